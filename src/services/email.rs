//! Email service for staff notifications

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

/// Subject and plain-text body of the assignment notice
fn service_request_assigned(staff_name: &str, description: &str) -> (String, String) {
    let subject = "New Service Request Assigned".to_string();
    let body = format!(
        r#"
Hello {staff_name},

A new service request has been assigned to you:

{description}

Please check the dashboard for details.
"#,
        staff_name = staff_name,
        description = description
    );
    (subject, body)
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Tell a staff member a service request was assigned to them
    pub async fn send_service_request_assigned(
        &self,
        to: &str,
        staff_name: &str,
        description: &str,
    ) -> AppResult<()> {
        let (subject, body) = service_request_assigned(staff_name, description);
        self.send_email(to, &subject, &body).await
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Hotel Sync");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><p>{}</p></body></html>"#,
                                body.trim().replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = match (&self.config.smtp_username, &self.config.smtp_password) {
            (Some(username), Some(password)) => {
                mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
            }
            _ => mailer_builder,
        };

        let mailer = mailer_builder.build();

        // SmtpTransport is blocking
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::Internal(format!("Email task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_template() {
        let (subject, body) = service_request_assigned("Sam", "Extra towels for 204");
        assert_eq!(subject, "New Service Request Assigned");
        assert!(body.contains("Hello Sam"));
        assert!(body.contains("Extra towels for 204"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_sending() {
        let service = EmailService::new(EmailConfig::default());
        let result = service
            .send_service_request_assigned("not an address", "Sam", "Fix the lamp")
            .await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
