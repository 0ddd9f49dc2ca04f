//! Handles the "Deny" button on application messages: asks the moderator for a reason,
//! records the denial with the backend and lets the applicant know.

use std::{sync::Arc, time::Duration};

use anyhow::Context as AnyhowContext;
use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateEmbed,
    CreateInteractionResponse, CreateMessage, CreateModal, EditMessage, GuildId, Interaction,
    Mentionable, MessageId, ModalInteraction, ModalInteractionCollector, UserId,
};

use crate::{
    api::{Application, ApplicationApi, DenialRequest},
    components::{self, DenialNotice},
    config::{Branding, Configuration},
    constant,
    util::{self, RespondableInteraction},
};

/// How a single press of the deny button ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    ApplicationNotFound,
    MemberNotFound,
    TimedOut,
    Denied,
    /// An unexpected error was logged and reported to the moderator
    Failed,
}

/// The part of Discord a deny flow talks to, scoped to the button press that started it
#[serenity::async_trait]
pub trait DenyInteraction: Send + Sync {
    fn is_button(&self) -> bool;
    fn custom_id(&self) -> &str;
    fn invoked_by_bot(&self) -> bool;
    fn guild_id(&self) -> Option<GuildId>;
    /// The application message the button is attached to
    fn message_id(&self) -> MessageId;
    fn moderator_id(&self) -> UserId;
    fn moderator_tag(&self) -> String;
    fn moderator_avatar_url(&self) -> String;

    /// The applicant's tag, or `None` if they are no longer a member
    async fn applicant_tag(&self, guild_id: GuildId, applicant: UserId)
    -> anyhow::Result<Option<String>>;
    async fn reply_ephemeral(&self, content: &str) -> anyhow::Result<()>;
    async fn set_application_row(&self, disabled: bool) -> anyhow::Result<()>;
    /// Posts the "being responded to" notice under the application and returns its id
    async fn announce_responder(&self) -> anyhow::Result<MessageId>;
    async fn delete_message(&self, message_id: MessageId) -> anyhow::Result<()>;
    async fn show_modal(&self, modal: CreateModal) -> anyhow::Result<()>;
    /// Waits for the moderator's reason. Acknowledges the submission when one arrives.
    async fn await_reason(&self, timeout: Duration) -> anyhow::Result<Option<String>>;
    /// Turns the application embed red and removes its buttons
    async fn mark_denied(&self) -> anyhow::Result<()>;
    async fn notify_applicant(&self, applicant: UserId, notice: CreateEmbed)
    -> anyhow::Result<()>;
}

/// Only moderator presses of the deny button are handled
pub fn is_deny_press(is_button: bool, custom_id: &str, invoked_by_bot: bool) -> bool {
    is_button && !invoked_by_bot && custom_id == constant::button::DENY
}

/// A moderator can have reason modals open for several applications at once.
/// Each flow only takes the submission made from its own application message.
pub fn submitted_for(submitted_from: Option<MessageId>, application: MessageId) -> bool {
    submitted_from == Some(application)
}

enum Review {
    Stopped(Outcome),
    Reason {
        application: Application,
        reason: String,
    },
}

pub struct DenyListener {
    api: Arc<dyn ApplicationApi>,
    modal_timeout: Duration,
    branding: Branding,
}
impl DenyListener {
    pub fn new(api: Arc<dyn ApplicationApi>, config: &Configuration) -> Self {
        Self {
            api,
            modal_timeout: Duration::from_secs(config.deny.modal_timeout_secs),
            branding: config.branding.clone(),
        }
    }

    pub async fn handle<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
    ) -> anyhow::Result<Outcome> {
        if !is_deny_press(
            interaction.is_button(),
            interaction.custom_id(),
            interaction.invoked_by_bot(),
        ) {
            return Ok(Outcome::Ignored);
        }
        let Some(guild_id) = interaction.guild_id() else {
            tracing::debug!("ignoring deny press outside of a guild");
            return Ok(Outcome::Ignored);
        };

        let (application, reason) = match self.review(interaction, guild_id).await {
            Ok(Review::Reason {
                application,
                reason,
            }) => (application, reason),
            Ok(Review::Stopped(outcome)) => return Ok(outcome),
            Err(err) => {
                tracing::error!(%guild_id, "failed to fetch application: {err:?}");
                interaction
                    .reply_ephemeral(constant::reply::FETCH_FAILED)
                    .await?;
                return Ok(Outcome::Failed);
            }
        };

        if let Err(err) = self
            .deny_applicant(interaction, guild_id, application, &reason)
            .await
        {
            tracing::error!(%guild_id, "failed to deny application: {err:?}");
            interaction
                .reply_ephemeral(constant::reply::DENY_FAILED)
                .await?;
            return Ok(Outcome::Failed);
        }

        Ok(Outcome::Denied)
    }

    async fn review<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
        guild_id: GuildId,
    ) -> anyhow::Result<Review> {
        let message_id = interaction.message_id();
        let Some(application) = self.api.fetch_application(guild_id, message_id).await? else {
            interaction
                .reply_ephemeral(constant::reply::APPLICATION_NOT_FOUND)
                .await?;
            return Ok(Review::Stopped(Outcome::ApplicationNotFound));
        };

        let Some(applicant_tag) = interaction
            .applicant_tag(guild_id, application.applicant_id)
            .await?
        else {
            interaction
                .reply_ephemeral(constant::reply::MEMBER_NOT_FOUND)
                .await?;
            return Ok(Review::Stopped(Outcome::MemberNotFound));
        };

        let modal = components::reason_modal(&self.branding.name, &applicant_tag);

        // Both have to land before the modal, which must be shown within the interaction deadline
        let (disabled, notification) = tokio::join!(
            interaction.set_application_row(true),
            interaction.announce_responder()
        );
        let notification = match (disabled, notification) {
            (Ok(()), Ok(notification)) => notification,
            (Err(err), notification) => {
                self.restore_or_log(interaction, notification.ok()).await;
                return Err(err);
            }
            (Ok(()), Err(err)) => {
                self.restore_or_log(interaction, None).await;
                return Err(err);
            }
        };

        let reason = match self.prompt_reason(interaction, modal, notification).await {
            Ok(Some(reason)) => reason,
            Ok(None) => {
                tracing::info!(%guild_id, %message_id, "no reason submitted in time, restoring application");
                self.restore(interaction, Some(notification)).await?;
                return Ok(Review::Stopped(Outcome::TimedOut));
            }
            Err(err) => {
                self.restore_or_log(interaction, Some(notification)).await;
                return Err(err);
            }
        };

        Ok(Review::Reason {
            application,
            reason,
        })
    }

    /// Shows the modal and waits for it. The responder notification is removed once a reason arrives.
    async fn prompt_reason<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
        modal: CreateModal,
        notification: MessageId,
    ) -> anyhow::Result<Option<String>> {
        interaction.show_modal(modal).await?;

        let reason = interaction.await_reason(self.modal_timeout).await?;
        if reason.is_some() {
            interaction.delete_message(notification).await?;
        }
        Ok(reason)
    }

    /// Puts the application back the way it was before a moderator started responding
    async fn restore<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
        notification: Option<MessageId>,
    ) -> anyhow::Result<()> {
        let enabled = interaction.set_application_row(false).await;
        let deleted = match notification {
            Some(notification) => interaction.delete_message(notification).await,
            None => Ok(()),
        };
        enabled.and(deleted)
    }

    async fn restore_or_log<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
        notification: Option<MessageId>,
    ) {
        if let Err(err) = self.restore(interaction, notification).await {
            tracing::warn!(
                message_id = %interaction.message_id(),
                "failed to restore application: {err:?}"
            );
        }
    }

    async fn deny_applicant<I: DenyInteraction + ?Sized>(
        &self,
        interaction: &I,
        guild_id: GuildId,
        application: Application,
        reason: &str,
    ) -> anyhow::Result<()> {
        let message_id = interaction.message_id();
        self.api
            .record_denial(
                guild_id,
                message_id,
                &DenialRequest::new(interaction.moderator_id(), reason),
            )
            .await?;
        tracing::info!(
            %guild_id,
            %message_id,
            moderator = %interaction.moderator_id(),
            applicant = %application.applicant_id,
            "application denied"
        );

        interaction.mark_denied().await?;

        let moderator_tag = interaction.moderator_tag();
        let moderator_avatar_url = interaction.moderator_avatar_url();
        let notice = DenialNotice {
            moderator_tag: &moderator_tag,
            moderator_avatar_url: &moderator_avatar_url,
            reason,
        };
        interaction
            .notify_applicant(application.applicant_id, notice.to_embed(&self.branding))
            .await
    }
}

#[serenity::async_trait]
impl super::Listener for DenyListener {
    fn name(&self) -> &str {
        "deny"
    }

    async fn run(&self, ctx: &Context, interaction: &Interaction) -> anyhow::Result<()> {
        let Interaction::Component(component) = interaction else {
            return Ok(());
        };

        let outcome = self.handle(&ComponentDeny { ctx, component }).await?;
        if outcome != Outcome::Ignored {
            tracing::debug!(?outcome, "deny press handled");
        }
        Ok(())
    }
}

/// [`DenyInteraction`] over a live component interaction
struct ComponentDeny<'a> {
    ctx: &'a Context,
    component: &'a ComponentInteraction,
}

#[serenity::async_trait]
impl DenyInteraction for ComponentDeny<'_> {
    fn is_button(&self) -> bool {
        matches!(self.component.data.kind, ComponentInteractionDataKind::Button)
    }
    fn custom_id(&self) -> &str {
        &self.component.data.custom_id
    }
    fn invoked_by_bot(&self) -> bool {
        self.component.user.bot
    }
    fn guild_id(&self) -> Option<GuildId> {
        self.component.guild_id
    }
    fn message_id(&self) -> MessageId {
        self.component.message.id
    }
    fn moderator_id(&self) -> UserId {
        self.component.user.id
    }
    fn moderator_tag(&self) -> String {
        self.component.user.tag()
    }
    fn moderator_avatar_url(&self) -> String {
        match &self.component.member {
            Some(member) => member.face(),
            None => self.component.user.face(),
        }
    }

    async fn applicant_tag(
        &self,
        guild_id: GuildId,
        applicant: UserId,
    ) -> anyhow::Result<Option<String>> {
        match guild_id.member(self.ctx, applicant).await {
            Ok(member) => Ok(Some(member.user.tag())),
            Err(err) if util::is_not_found(&err) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn reply_ephemeral(&self, content: &str) -> anyhow::Result<()> {
        self.component
            .create_or_followup_ephemeral(&self.ctx.http, content)
            .await
    }

    async fn set_application_row(&self, disabled: bool) -> anyhow::Result<()> {
        self.component
            .channel_id
            .edit_message(
                self.ctx,
                self.component.message.id,
                EditMessage::new().components(vec![components::application_row(disabled)]),
            )
            .await?;
        Ok(())
    }

    async fn announce_responder(&self) -> anyhow::Result<MessageId> {
        let notification = self
            .component
            .message
            .reply(
                self.ctx,
                format!(
                    "Application is being responded to by {}",
                    self.component.user.mention()
                ),
            )
            .await?;
        Ok(notification.id)
    }

    async fn delete_message(&self, message_id: MessageId) -> anyhow::Result<()> {
        self.component
            .channel_id
            .delete_message(&self.ctx.http, message_id)
            .await?;
        Ok(())
    }

    async fn show_modal(&self, modal: CreateModal) -> anyhow::Result<()> {
        self.component
            .create_response(self.ctx, CreateInteractionResponse::Modal(modal))
            .await?;
        Ok(())
    }

    async fn await_reason(&self, timeout: Duration) -> anyhow::Result<Option<String>> {
        let application = self.component.message.id;
        let Some(submission) = ModalInteractionCollector::new(self.ctx)
            .author_id(self.component.user.id)
            .custom_ids(vec![constant::modal::REASON.to_string()])
            .filter(move |modal: &ModalInteraction| {
                submitted_for(modal.message.as_ref().map(|m| m.id), application)
            })
            .timeout(timeout)
            .next()
            .await
        else {
            return Ok(None);
        };

        let reason = util::input_value(&submission.data.components, constant::modal::ADMIN_REASON)
            .context("reason modal was submitted without a reason")?
            .to_string();
        submission
            .create_ephemeral(&self.ctx.http, constant::reply::SUBMISSION_RECEIVED)
            .await?;

        Ok(Some(reason))
    }

    async fn mark_denied(&self) -> anyhow::Result<()> {
        let mut edit = EditMessage::new().components(vec![]);
        if let Some(embed) = self.component.message.embeds.first() {
            edit = edit.embeds(vec![components::denied_application_embed(embed.clone())]);
        }
        self.component
            .channel_id
            .edit_message(self.ctx, self.component.message.id, edit)
            .await?;
        Ok(())
    }

    async fn notify_applicant(
        &self,
        applicant: UserId,
        notice: CreateEmbed,
    ) -> anyhow::Result<()> {
        applicant
            .direct_message(self.ctx, CreateMessage::new().embed(notice))
            .await
            .context("failed to message the applicant")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::api::ApiError;

    const GUILD: GuildId = GuildId::new(100);
    const MESSAGE: MessageId = MessageId::new(200);
    const NOTIFICATION: MessageId = MessageId::new(201);
    const MODERATOR: UserId = UserId::new(300);
    const APPLICANT: UserId = UserId::new(400);

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Reply(&'static str),
        ApplicationRow { disabled: bool },
        Announce,
        Delete(MessageId),
        ShowModal,
        AwaitReason(Duration),
        MarkDenied,
        Notify(UserId),
    }

    struct FakeInteraction {
        is_button: bool,
        custom_id: &'static str,
        bot: bool,
        guild_id: Option<GuildId>,
        applicant_tag: Option<&'static str>,
        reason: Option<&'static str>,
        dm_fails: bool,
        announce_fails: bool,
        modal_fails: bool,
        calls: Mutex<Vec<Call>>,
    }
    impl Default for FakeInteraction {
        fn default() -> Self {
            Self {
                is_button: true,
                custom_id: constant::button::DENY,
                bot: false,
                guild_id: Some(GUILD),
                applicant_tag: Some("applicant"),
                reason: Some("We are not recruiting right now."),
                dm_fails: false,
                announce_fails: false,
                modal_fails: false,
                calls: Mutex::new(vec![]),
            }
        }
    }
    impl FakeInteraction {
        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[serenity::async_trait]
    impl DenyInteraction for FakeInteraction {
        fn is_button(&self) -> bool {
            self.is_button
        }
        fn custom_id(&self) -> &str {
            self.custom_id
        }
        fn invoked_by_bot(&self) -> bool {
            self.bot
        }
        fn guild_id(&self) -> Option<GuildId> {
            self.guild_id
        }
        fn message_id(&self) -> MessageId {
            MESSAGE
        }
        fn moderator_id(&self) -> UserId {
            MODERATOR
        }
        fn moderator_tag(&self) -> String {
            "moderator".to_string()
        }
        fn moderator_avatar_url(&self) -> String {
            "https://cdn.example.com/moderator.png".to_string()
        }

        async fn applicant_tag(
            &self,
            guild_id: GuildId,
            applicant: UserId,
        ) -> anyhow::Result<Option<String>> {
            assert_eq!((guild_id, applicant), (GUILD, APPLICANT));
            Ok(self.applicant_tag.map(str::to_string))
        }
        async fn reply_ephemeral(&self, content: &str) -> anyhow::Result<()> {
            let content = [
                constant::reply::APPLICATION_NOT_FOUND,
                constant::reply::MEMBER_NOT_FOUND,
                constant::reply::FETCH_FAILED,
                constant::reply::DENY_FAILED,
            ]
            .into_iter()
            .find(|known| *known == content)
            .expect("unexpected reply");
            self.record(Call::Reply(content));
            Ok(())
        }
        async fn set_application_row(&self, disabled: bool) -> anyhow::Result<()> {
            self.record(Call::ApplicationRow { disabled });
            Ok(())
        }
        async fn announce_responder(&self) -> anyhow::Result<MessageId> {
            self.record(Call::Announce);
            if self.announce_fails {
                anyhow::bail!("Missing Permissions");
            }
            Ok(NOTIFICATION)
        }
        async fn delete_message(&self, message_id: MessageId) -> anyhow::Result<()> {
            self.record(Call::Delete(message_id));
            Ok(())
        }
        async fn show_modal(&self, _modal: CreateModal) -> anyhow::Result<()> {
            self.record(Call::ShowModal);
            if self.modal_fails {
                anyhow::bail!("Unknown interaction");
            }
            Ok(())
        }
        async fn await_reason(&self, timeout: Duration) -> anyhow::Result<Option<String>> {
            self.record(Call::AwaitReason(timeout));
            Ok(self.reason.map(str::to_string))
        }
        async fn mark_denied(&self) -> anyhow::Result<()> {
            self.record(Call::MarkDenied);
            Ok(())
        }
        async fn notify_applicant(
            &self,
            applicant: UserId,
            notice: CreateEmbed,
        ) -> anyhow::Result<()> {
            let notice = serde_json::to_value(notice)?;
            assert_eq!(notice["description"], self.reason.unwrap());
            assert_eq!(notice["title"], "moderator Denied your application");

            self.record(Call::Notify(applicant));
            if self.dm_fails {
                anyhow::bail!("Cannot send messages to this user");
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeApi {
        application: Option<Application>,
        fetch_fails: bool,
        fetches: Mutex<usize>,
        denials: Mutex<Vec<DenialRequest>>,
    }
    impl FakeApi {
        fn with_application() -> Self {
            Self {
                application: Some(Application {
                    applicant_id: APPLICANT,
                }),
                ..Default::default()
            }
        }
    }

    #[serenity::async_trait]
    impl ApplicationApi for FakeApi {
        async fn fetch_application(
            &self,
            guild_id: GuildId,
            message_id: MessageId,
        ) -> Result<Option<Application>, ApiError> {
            assert_eq!((guild_id, message_id), (GUILD, MESSAGE));
            *self.fetches.lock().unwrap() += 1;
            if self.fetch_fails {
                return Err(ApiError::InvalidApplicant("garbage".to_string()));
            }
            Ok(self.application)
        }
        async fn record_denial(
            &self,
            guild_id: GuildId,
            message_id: MessageId,
            request: &DenialRequest,
        ) -> Result<(), ApiError> {
            assert_eq!((guild_id, message_id), (GUILD, MESSAGE));
            self.denials.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn listener(api: &Arc<FakeApi>) -> DenyListener {
        DenyListener::new(api.clone(), &Configuration::default())
    }

    #[test]
    fn test_is_deny_press() {
        assert!(is_deny_press(true, constant::button::DENY, false));
        assert!(!is_deny_press(false, constant::button::DENY, false));
        assert!(!is_deny_press(true, constant::button::DENY, true));
        assert!(!is_deny_press(true, constant::button::ACCEPT, false));
    }

    #[test]
    fn test_submitted_for() {
        assert!(submitted_for(Some(MESSAGE), MESSAGE));
        // Same moderator, modal opened from another application
        assert!(!submitted_for(Some(NOTIFICATION), MESSAGE));
        assert!(!submitted_for(None, MESSAGE));
    }

    #[tokio::test]
    async fn test_guards_have_no_side_effects() {
        let interactions = [
            FakeInteraction {
                bot: true,
                ..Default::default()
            },
            FakeInteraction {
                custom_id: constant::button::ACCEPT,
                ..Default::default()
            },
            FakeInteraction {
                is_button: false,
                ..Default::default()
            },
            FakeInteraction {
                guild_id: None,
                ..Default::default()
            },
        ];

        for interaction in interactions {
            let api = Arc::new(FakeApi::with_application());
            let outcome = listener(&api).handle(&interaction).await.unwrap();

            assert_eq!(outcome, Outcome::Ignored);
            assert!(interaction.calls().is_empty());
            assert_eq!(*api.fetches.lock().unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_missing_application() {
        let api = Arc::new(FakeApi::default());
        let interaction = FakeInteraction::default();

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::ApplicationNotFound);
        assert_eq!(
            interaction.calls(),
            vec![Call::Reply(constant::reply::APPLICATION_NOT_FOUND)]
        );
        assert!(api.denials.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_applicant_left_the_server() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction {
            applicant_tag: None,
            ..Default::default()
        };

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::MemberNotFound);
        assert_eq!(
            interaction.calls(),
            vec![Call::Reply(constant::reply::MEMBER_NOT_FOUND)]
        );
    }

    #[tokio::test]
    async fn test_timeout_restores_application() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction {
            reason: None,
            ..Default::default()
        };

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::TimedOut);
        assert_eq!(
            interaction.calls(),
            vec![
                Call::ApplicationRow { disabled: true },
                Call::Announce,
                Call::ShowModal,
                Call::AwaitReason(Duration::from_secs(60)),
                Call::ApplicationRow { disabled: false },
                Call::Delete(NOTIFICATION),
            ]
        );
        assert!(api.denials.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_denies_applicant() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction::default();

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::Denied);
        assert_eq!(
            *api.denials.lock().unwrap(),
            vec![DenialRequest::new(
                MODERATOR,
                "We are not recruiting right now."
            )]
        );
        assert_eq!(
            interaction.calls(),
            vec![
                Call::ApplicationRow { disabled: true },
                Call::Announce,
                Call::ShowModal,
                Call::AwaitReason(Duration::from_secs(60)),
                Call::Delete(NOTIFICATION),
                Call::MarkDenied,
                Call::Notify(APPLICANT),
            ]
        );
    }

    #[tokio::test]
    async fn test_configured_timeout_is_used() {
        let api = Arc::new(FakeApi::with_application());
        let mut config = Configuration::default();
        config.deny.modal_timeout_secs = 5;
        let interaction = FakeInteraction {
            reason: None,
            ..Default::default()
        };

        DenyListener::new(api, &config)
            .handle(&interaction)
            .await
            .unwrap();

        assert!(
            interaction
                .calls()
                .contains(&Call::AwaitReason(Duration::from_secs(5)))
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_reported() {
        let api = Arc::new(FakeApi {
            fetch_fails: true,
            ..FakeApi::with_application()
        });
        let interaction = FakeInteraction::default();

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            interaction.calls(),
            vec![Call::Reply(constant::reply::FETCH_FAILED)]
        );
    }

    #[tokio::test]
    async fn test_dm_failure_is_reported() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction {
            dm_fails: true,
            ..Default::default()
        };

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(api.denials.lock().unwrap().len(), 1);
        assert_eq!(
            interaction.calls().last(),
            Some(&Call::Reply(constant::reply::DENY_FAILED))
        );
    }

    #[tokio::test]
    async fn test_modal_failure_restores_application() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction {
            modal_fails: true,
            ..Default::default()
        };

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            interaction.calls(),
            vec![
                Call::ApplicationRow { disabled: true },
                Call::Announce,
                Call::ShowModal,
                Call::ApplicationRow { disabled: false },
                Call::Delete(NOTIFICATION),
                Call::Reply(constant::reply::FETCH_FAILED),
            ]
        );
        assert!(api.denials.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_announce_failure_restores_application() {
        let api = Arc::new(FakeApi::with_application());
        let interaction = FakeInteraction {
            announce_fails: true,
            ..Default::default()
        };

        let outcome = listener(&api).handle(&interaction).await.unwrap();

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(
            interaction.calls(),
            vec![
                Call::ApplicationRow { disabled: true },
                Call::Announce,
                Call::ApplicationRow { disabled: false },
                Call::Reply(constant::reply::FETCH_FAILED),
            ]
        );
    }
}
