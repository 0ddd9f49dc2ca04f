use serenity::{all::*, async_trait};

#[async_trait]
pub trait RespondableInteraction: Send + Sync {
    async fn create_ephemeral(&self, http: &Http, message: &str) -> anyhow::Result<()>;
    async fn followup_ephemeral(&self, http: &Http, message: &str) -> anyhow::Result<()>;
    /// Responds if the interaction is still unacknowledged, otherwise sends a follow-up.
    async fn create_or_followup_ephemeral(&self, http: &Http, message: &str) -> anyhow::Result<()>;
}
macro_rules! implement_respondable_interaction {
    ($name:ident) => {
        #[async_trait]
        impl RespondableInteraction for $name {
            async fn create_ephemeral(&self, http: &Http, msg: &str) -> anyhow::Result<()> {
                Ok(self
                    .create_response(
                        http,
                        CreateInteractionResponse::Message(
                            CreateInteractionResponseMessage::new()
                                .content(msg)
                                .ephemeral(true),
                        ),
                    )
                    .await?)
            }
            async fn followup_ephemeral(&self, http: &Http, msg: &str) -> anyhow::Result<()> {
                self.create_followup(
                    http,
                    CreateInteractionResponseFollowup::new()
                        .content(msg)
                        .ephemeral(true),
                )
                .await?;
                Ok(())
            }
            async fn create_or_followup_ephemeral(
                &self,
                http: &Http,
                msg: &str,
            ) -> anyhow::Result<()> {
                if self.create_ephemeral(http, msg).await.is_err() {
                    self.followup_ephemeral(http, msg).await?;
                }
                Ok(())
            }
        }
    };
}
implement_respondable_interaction!(ComponentInteraction);
implement_respondable_interaction!(ModalInteraction);

/// Finds the value of a text input in a submitted modal
pub fn input_value<'a>(rows: &'a [ActionRow], custom_id: &str) -> Option<&'a str> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            ActionRowComponent::InputText(input) if input.custom_id == custom_id => {
                input.value.as_deref()
            }
            _ => None,
        })
}

/// The 404 Discord answers with for members that left, or users that never joined
pub fn is_not_found(err: &serenity::Error) -> bool {
    http_status(err).is_some_and(is_not_found_status)
}

fn http_status(err: &serenity::Error) -> Option<u16> {
    match err {
        serenity::Error::Http(serenity::http::HttpError::UnsuccessfulRequest(response)) => {
            Some(response.status_code.as_u16())
        }
        _ => None,
    }
}

fn is_not_found_status(status: u16) -> bool {
    status == 404
}
