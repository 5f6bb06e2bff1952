// Adapters layer: concrete implementations of the domain ports (MySQL source, Mailchimp client).

pub mod mailchimp;
pub mod mysql;
