mod command;
mod listening;
mod options;

pub use {
    command::{ServiceCommand, ServiceStatus},
    listening::ListeningService,
    options::{Collaborators, DEFAULT_CONTACT_NAME, ServiceOptions},
};
