//! Mail envelope of a digest: sender check and decoded text body.

use mailparse::{MailHeaderMap, ParsedMail};

use crate::app::{DigestError, Result};

/// Sender address of the arXiv mailing service.
pub const DIGEST_SENDER: &str = "no-reply@arxiv.org";

#[derive(Debug, Clone)]
pub struct DigestMessage {
    pub sender: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

impl DigestMessage {
    /// Parse a raw RFC 822 message, decoding the transfer encoding and
    /// charset of its plain-text body.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let mail = mailparse::parse_mail(raw)?;

        Ok(Self {
            sender: mail.headers.get_first_value("From"),
            subject: mail.headers.get_first_value("Subject"),
            body: text_body(&mail)?,
        })
    }

    pub fn is_digest(&self) -> bool {
        self.sender
            .as_deref()
            .and_then(sender_address)
            .is_some_and(|address| address.eq_ignore_ascii_case(DIGEST_SENDER))
    }

    pub fn ensure_digest(&self) -> Result<()> {
        if self.is_digest() {
            Ok(())
        } else {
            Err(DigestError::NotADigest(
                self.sender.clone().unwrap_or_else(|| "(none)".to_string()),
            ))
        }
    }

    /// Body lines with their terminators stripped.
    pub fn lines(&self) -> Vec<&str> {
        self.body.lines().collect()
    }
}

fn text_body(mail: &ParsedMail) -> Result<String> {
    if mail.subparts.is_empty() {
        return Ok(mail.get_body()?);
    }

    for part in &mail.subparts {
        if part.ctype.mimetype.eq_ignore_ascii_case("text/plain") || !part.subparts.is_empty() {
            return text_body(part);
        }
    }

    Ok(mail.get_body()?)
}

/// Bare address from a `From` header value.
///
/// Handles both `name <addr>` and the `addr (comment)` form the mailing
/// service uses.
fn sender_address(header: &str) -> Option<&str> {
    if let Some(start) = header.find('<') {
        let rest = &header[start + 1..];
        let end = rest.find('>')?;
        return Some(rest[..end].trim());
    }

    header.split_whitespace().find(|token| token.contains('@'))
}
