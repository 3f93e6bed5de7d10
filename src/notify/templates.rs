//! Fixed HTML templates for the two outbound email kinds, plus the plain-text
//! alert message stored in provider notifications and sent by SMS.

use crate::core::alerts::WeightChange;
use crate::entities::{reminder, user};

/// Subject line for reminder emails.
pub const REMINDER_SUBJECT: &str = "Dry Weight Watchers Reminder";

/// Subject line for weight-change alert emails.
pub const ALERT_SUBJECT: &str = "Alert: Drastic Weight Change Detected";

/// HTML body of a reminder email, embedding the reminder's time and days.
#[must_use]
pub fn reminder_email_html(entry: &reminder::Model) -> String {
    let time = entry.time.format("%H:%M");
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; background-color: #f9f9f9; margin: 0; padding: 20px;">
    <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border: 1px solid #ddd; border-radius: 8px; padding: 20px;">
      <tr>
        <td style="text-align: center; padding-bottom: 20px;">
          <h1 style="color: #333; font-size: 24px;">Reminder: Record Your Dry Weight</h1>
          <p style="color: #555; font-size: 16px;">Don't forget to record your dry weight for today!</p>
        </td>
      </tr>
      <tr>
        <td style="text-align: center; padding: 20px;">
          <p style="color: #666; font-size: 16px;">Scheduled for: {time}</p>
          <p style="color: #666; font-size: 16px;">Days: {days}</p>
        </td>
      </tr>
      <tr>
        <td style="text-align: center; padding-top: 20px; font-size: 14px; color: #999;">
          You can manage your notification preferences in the app settings.
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        time = time,
        days = entry.days,
    )
}

/// HTML body of a weight-change alert email.
#[must_use]
pub fn weight_alert_email_html(change: &WeightChange) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; background-color: #f9f9f9; margin: 0; padding: 20px;">
    <table width="100%" cellpadding="0" cellspacing="0" style="max-width: 600px; margin: 0 auto; background-color: #ffffff; border: 1px solid #ddd; border-radius: 8px; padding: 20px;">
      <tr>
        <td style="text-align: center; padding-bottom: 20px;">
          <h1 style="color: #333; font-size: 24px;">Weight Change Alert</h1>
          <p style="color: #555; font-size: 16px;">One of your patients has experienced a significant weight change.</p>
          <p style="color: #555; font-size: 16px;">Change: {change:.2} lbs</p>
        </td>
      </tr>
      <tr>
        <td style="text-align: center; padding-top: 20px; font-size: 14px; color: #999;">
          Please review the patient's data and take appropriate action if needed.
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        change = change.change,
    )
}

/// Plain-text alert message used for the in-app notification row and SMS.
#[must_use]
pub fn weight_alert_message(patient: &user::Model, change: &WeightChange) -> String {
    format!(
        "Patient {} has experienced a dramatic weight change of {:.2} lbs. \
         Please review the patient's data and take appropriate action if needed.",
        patient.full_name(),
        change.change,
    )
}
