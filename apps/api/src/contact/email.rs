use serde::Serialize;

use crate::contact::validation::ContactMessage;

/// A rendered notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
}

/// Renders the inbox notification for a contact submission. The message fields
/// are already HTML-escaped by validation.
pub fn render_contact_email(msg: &ContactMessage, from: &str, to: &str) -> OutgoingMail {
    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333; border-bottom: 2px solid #4f46e5; padding-bottom: 10px;">New Contact Form Submission</h2>
  <div style="background: #f8fafc; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Subject:</strong> {subject}</p>
  </div>
  <div style="background: #fff; padding: 20px; border-left: 4px solid #4f46e5;">
    <h3 style="color: #333; margin-top: 0;">Message:</h3>
    <p style="line-height: 1.6; color: #555;">{message}</p>
  </div>
  <p style="color: #666; font-size: 12px; margin-top: 30px;">Sent from the portfolio contact form at {received} (ref {id}).</p>
</div>"#,
        name = msg.name,
        email = msg.email,
        subject = msg.subject,
        message = msg.message,
        received = msg.received_at.format("%Y-%m-%d %H:%M UTC"),
        id = msg.id,
    );

    OutgoingMail {
        from: from.to_string(),
        to: to.to_string(),
        reply_to: msg.email.clone(),
        subject: format!("Portfolio Contact: {}", msg.subject),
        html,
    }
}
