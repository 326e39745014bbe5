use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use super::ReportSink;

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    pub fn from_env() -> Self {
        let host = std::env::var("SMTP_HOST").expect("SMTP_HOST missing");
        let user = std::env::var("SMTP_USER").expect("SMTP_USER missing");
        let pass = std::env::var("SMTP_PASS").expect("SMTP_PASS missing");
        let from_addr =
            std::env::var("REPORT_EMAIL_FROM").expect("REPORT_EMAIL_FROM missing");
        let to_addr = std::env::var("REPORT_EMAIL_TO").expect("REPORT_EMAIL_TO missing");

        let creds = Credentials::new(user, pass);
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
            .expect("invalid SMTP_HOST")
            .credentials(creds)
            .build();

        let from = from_addr.parse().expect("invalid REPORT_EMAIL_FROM");
        let to = to_addr.parse().expect("invalid REPORT_EMAIL_TO");

        Self { mailer, from, to }
    }
}

#[async_trait::async_trait]
impl ReportSink for EmailSender {
    async fn deliver(&self, subject: &str, html: &str) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html.to_string())
            .context("build email")?;

        self.mailer.send(msg).await.context("send email")?;
        Ok(())
    }
}
