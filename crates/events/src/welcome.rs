//! Welcome message for newly created staff accounts.

use chrono::{Datelike, Utc};

use crate::delivery::email::OutboundEmail;

/// Product name used in subjects and signatures.
pub const APP_NAME: &str = "E-sante SN";

/// The account details quoted in a welcome message.
#[derive(Debug, Clone)]
pub struct WelcomeRecipient {
    pub email: String,
    pub full_name: String,
    pub badge_id: String,
    pub role: String,
}

/// Compose the welcome message. `None` when the account has no address.
///
/// The password is never included; the recipient gets it from whoever
/// created the account.
pub fn welcome_email(recipient: &WelcomeRecipient, app_url: &str) -> Option<OutboundEmail> {
    if recipient.email.trim().is_empty() {
        return None;
    }
    let body = format!(
        "Bonjour {name},\n\n\
         Votre compte {APP_NAME} a ete cree.\n\n\
         Identifiant (badge) : {badge}\n\
         Role : {role}\n\n\
         Connectez-vous sur {app_url}\n\n\
         {APP_NAME} {year}",
        name = recipient.full_name,
        badge = recipient.badge_id,
        role = recipient.role,
        year = Utc::now().year(),
    );
    Some(OutboundEmail {
        to: recipient.email.clone(),
        subject: format!("Bienvenue sur {APP_NAME}"),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(email: &str) -> WelcomeRecipient {
        WelcomeRecipient {
            email: email.into(),
            full_name: "Awa Ndiaye".into(),
            badge_id: "AGENT-AB12CD34".into(),
            role: "HEALTH_WORKER".into(),
        }
    }

    #[test]
    fn welcome_quotes_badge_and_url() {
        let mail = welcome_email(&recipient("awa@x.org"), "https://esante.example").unwrap();
        assert_eq!(mail.to, "awa@x.org");
        assert_eq!(mail.subject, "Bienvenue sur E-sante SN");
        assert!(mail.body.contains("AGENT-AB12CD34"));
        assert!(mail.body.contains("https://esante.example"));
    }

    #[test]
    fn no_address_no_mail() {
        assert!(welcome_email(&recipient("  "), "http://x").is_none());
    }
}
