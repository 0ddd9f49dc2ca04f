use serenity::all::{
    ButtonStyle, Colour, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor,
    CreateInputText, CreateModal, Embed, InputTextStyle, Timestamp,
};

use crate::{config::Branding, constant};

/// The accept/deny row shown under every application. Disabled while a moderator is responding.
pub fn application_row(disabled: bool) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(constant::button::ACCEPT)
            .label("Accept")
            .style(ButtonStyle::Success)
            .disabled(disabled),
        CreateButton::new(constant::button::DENY)
            .label("Deny")
            .style(ButtonStyle::Danger)
            .disabled(disabled),
    ])
}

pub fn reason_modal(title: &str, applicant_tag: &str) -> CreateModal {
    let reason = CreateInputText::new(
        InputTextStyle::Paragraph,
        format!("Reason for denying {applicant_tag}"),
        constant::modal::ADMIN_REASON,
    )
    .min_length(constant::modal::REASON_MIN_LENGTH)
    .max_length(constant::modal::REASON_MAX_LENGTH)
    .required(true);

    CreateModal::new(constant::modal::REASON, title)
        .components(vec![CreateActionRow::InputText(reason)])
}

/// The application's embed once it has been denied
pub fn denied_application_embed(original: Embed) -> CreateEmbed {
    CreateEmbed::from(original).colour(Colour::RED)
}

/// What the applicant receives in their DMs
#[derive(Debug, Clone)]
pub struct DenialNotice<'a> {
    pub moderator_tag: &'a str,
    pub moderator_avatar_url: &'a str,
    pub reason: &'a str,
}
impl DenialNotice<'_> {
    pub fn to_embed(&self, branding: &Branding) -> CreateEmbed {
        CreateEmbed::new()
            .colour(Colour::ORANGE)
            .author(CreateEmbedAuthor::new(&branding.name).icon_url(&branding.icon_url))
            .title(format!("{} Denied your application", self.moderator_tag))
            .thumbnail(self.moderator_avatar_url)
            .image(&branding.denial_image_url)
            .description(self.reason)
            .timestamp(Timestamp::now())
    }
}
