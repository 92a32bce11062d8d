use std::fmt::{self, Display};

use super::{send_email, SendEmail};

/// Notifies a student that their application was reviewed.
pub struct ApplicationDecisionTemplate<'a> {
    pub name: &'a str,
    pub job_title: &'a str,
    pub approved: bool,
    pub notes: Option<&'a str>,
}

impl<'a> Display for ApplicationDecisionTemplate<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (headline, color, lede) = if self.approved {
            (
                "Application approved",
                "#059669",
                "Congratulations! Your application has been approved.",
            )
        } else {
            (
                "Application update",
                "#dc2626",
                "Unfortunately, your application was not selected this time.",
            )
        };
        let notes_block = match self.notes {
            Some(notes) => format!(
                r#"<div class="notes"><strong>Reviewer notes:</strong> {}</div>"#,
                notes
            ),
            None => String::new(),
        };
        let html_template = format!(
            r#"
            <!DOCTYPE html>
            <html>
            <head>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1.0">
                <title>{headline}</title>
                <style>
                    body {{
                        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
                        line-height: 1.6;
                        margin: 0;
                        padding: 0;
                        background-color: #f9fafb;
                    }}
                    .container {{
                        max-width: 600px;
                        margin: 0 auto;
                        padding: 20px;
                    }}
                    .card {{
                        padding: 30px;
                        background-color: #ffffff;
                        border-radius: 8px;
                        box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1);
                    }}
                    .headline {{
                        color: {color};
                        margin: 0 0 20px 0;
                    }}
                    .job-title {{
                        background-color: #f3f4f6;
                        padding: 12px;
                        border-radius: 6px;
                        font-weight: bold;
                        margin: 20px 0;
                    }}
                    .notes {{
                        color: #4b5563;
                        font-size: 14px;
                        margin-top: 20px;
                    }}
                </style>
            </head>
            <body>
                <div class="container">
                    <div class="card">
                        <h2 class="headline">{headline}</h2>
                        <p>Hello {name},</p>
                        <p>{lede}</p>
                        <div class="job-title">{job}</div>
                        {notes}
                    </div>
                </div>
            </body>
            </html>
            "#,
            headline = headline,
            color = color,
            name = self.name,
            lede = lede,
            job = self.job_title,
            notes = notes_block,
        );
        write!(f, "{}", html_template)
    }
}

impl<'a> SendEmail for ApplicationDecisionTemplate<'a> {
    fn send(&self, email: &str) -> crate::prelude::Result<()> {
        let subject = if self.approved {
            format!("You're in! Your application for {} was approved", self.job_title)
        } else {
            format!("An update on your application for {}", self.job_title)
        };
        send_email(email, &subject, &format!("{}", &self), true)?;
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_decision_template_renders_job_and_notes() {
        let body = ApplicationDecisionTemplate {
            name: "Rahul",
            job_title: "Computer Lab Tutor",
            approved: true,
            notes: Some("Strong technical skills."),
        }
        .to_string();
        assert!(body.contains("Computer Lab Tutor"));
        assert!(body.contains("Strong technical skills."));
        assert!(body.contains("approved"));
    }

    #[test]
    fn test_rejection_template_has_no_notes_block() {
        let body = ApplicationDecisionTemplate {
            name: "Priya",
            job_title: "Campus Tour Guide",
            approved: false,
            notes: None,
        }
        .to_string();
        assert!(!body.contains("Reviewer notes"));
        assert!(body.contains("not selected"));
    }
}
