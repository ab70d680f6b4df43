use thiserror::Error;

/// Failure talking to one of the map services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{service} responded with status {status}")]
    Status { service: &'static str, status: u16 },
    #[error("failed to reach {service}")]
    Unreachable {
        service: &'static str,
        #[source]
        source: Box<ureq::Transport>,
    },
    #[error("unexpected response from {service}")]
    Decode {
        service: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ServiceError {
    pub fn request(service: &'static str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, _) => Self::Status { service, status },
            ureq::Error::Transport(x) => Self::Unreachable {
                service,
                source: Box::new(x),
            },
        }
    }

    pub fn decode(service: &'static str, source: std::io::Error) -> Self {
        Self::Decode { service, source }
    }
}
