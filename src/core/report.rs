use crate::core::BatchResponse;
use crate::utils::error::Result;
use std::io::Write;

/// 將批次結果輸出成文字：先摘要行，再逐筆列出錯誤
pub struct ResultReporter<W: Write> {
    out: W,
}

impl<W: Write> ResultReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn report(&mut self, response: &BatchResponse) -> Result<()> {
        writeln!(
            self.out,
            "Added: {}, Updated: {}, Error: {}",
            response.added_count, response.updated_count, response.error_count
        )?;

        for error in &response.errors {
            tracing::warn!("Subscriber rejected: {} ({})", error.email, error.message);
            if error.email.is_empty() {
                writeln!(self.out, "{}", error.message)?;
            } else {
                writeln!(self.out, "{}: {}", error.email, error.message)?;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SubscriberError;

    fn render(response: &BatchResponse) -> String {
        let mut reporter = ResultReporter::new(Vec::new());
        reporter.report(response).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_summary_then_error_lines() {
        let output = render(&BatchResponse {
            added_count: 2,
            updated_count: 1,
            error_count: 1,
            errors: vec![SubscriberError {
                email: "x@y.com".to_string(),
                message: "invalid".to_string(),
            }],
        });

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Added: 2, Updated: 1, Error: 1");
        assert!(lines[1].contains("invalid"));
        assert!(lines[1].contains("x@y.com"));
    }

    #[test]
    fn test_no_errors_prints_only_summary() {
        let output = render(&BatchResponse {
            added_count: 10,
            ..BatchResponse::default()
        });
        assert_eq!(output, "Added: 10, Updated: 0, Error: 0\n");
    }

    #[test]
    fn test_error_without_email_prints_message_alone() {
        let output = render(&BatchResponse {
            error_count: 1,
            errors: vec![SubscriberError {
                email: String::new(),
                message: "List_RoleEmailMember".to_string(),
            }],
            ..BatchResponse::default()
        });
        assert_eq!(output.lines().nth(1), Some("List_RoleEmailMember"));
    }
}
