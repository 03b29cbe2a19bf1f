//! Canned email templates keyed by submission outcome.

/// Subject + HTML body pair ready to hand to the mailer.
#[derive(Debug, Clone)]
pub struct EmailTemplate {
    pub subject: String,
    pub html: String,
}

/// Confirmation sent to the submitter right after intake.
pub fn submission_received(tool_name: &str) -> EmailTemplate {
    EmailTemplate {
        subject: format!("Thank You for Submitting \"{}\" to AI Tool List", tool_name),
        html: format!(
            "<h2>Thanks for your submission!</h2>\
             <p>We received your submission for <strong>{}</strong>.</p>\
             <p>Our team reviews every tool by hand. You'll hear from us once \
             the review is complete — usually within a few days.</p>",
            tool_name
        ),
    }
}

/// Alert sent to the admin inbox when a new submission lands.
pub fn admin_new_submission(tool_name: &str, submitter_email: &str) -> EmailTemplate {
    EmailTemplate {
        subject: format!("New Tool Submission: {}", tool_name),
        html: format!(
            "<h2>New submission awaiting review</h2>\
             <p><strong>Tool:</strong> {}</p>\
             <p><strong>Submitted by:</strong> {}</p>\
             <p>Review it in the admin dashboard.</p>",
            tool_name, submitter_email
        ),
    }
}

/// Sent to the submitter when their tool is approved and published.
pub fn tool_approved(tool_name: &str, public_url: &str) -> EmailTemplate {
    EmailTemplate {
        subject: format!("Your Tool \"{}\" Has Been Published!", tool_name),
        html: format!(
            "<h2>Congratulations!</h2>\
             <p><strong>{}</strong> is now live on AI Tool List.</p>\
             <p>See it here: <a href=\"{url}\">{url}</a></p>",
            tool_name,
            url = public_url
        ),
    }
}

/// Sent to the submitter when their tool is rejected.
pub fn tool_rejected(tool_name: &str, reason: Option<&str>) -> EmailTemplate {
    let reason_html = match reason {
        Some(r) => format!("<p><strong>Reason:</strong> {}</p>", r),
        None => String::new(),
    };
    EmailTemplate {
        subject: format!("Update on Your Tool Submission: \"{}\"", tool_name),
        html: format!(
            "<h2>Submission update</h2>\
             <p>After review, we decided not to list <strong>{}</strong> at this time.</p>\
             {}\
             <p>You're welcome to address the feedback and submit again.</p>",
            tool_name, reason_html
        ),
    }
}
