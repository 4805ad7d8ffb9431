use super::{json_error_response, AppError, BError, ParameterError};
use anyhow::anyhow;
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    tokio::task::JoinError,
};
use sotags_core::repositories::Error as RepoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::OtherWithStatus(anyhow!(message.into()), Status::BadRequest)
    }
}

impl From<JoinError> for Error {
    fn from(err: JoinError) -> Self {
        Self::OtherWithStatus(anyhow!(err), Status::InternalServerError)
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(err) => {
                if let AppError::Business(err) = &err {
                    match err {
                        BError::Parameter(_) => {
                            return json_error_response(req, err, Status::BadRequest);
                        }
                        BError::Ingestion(_) => {
                            return json_error_response(req, err, Status::BadGateway);
                        }
                        BError::Interrupted(_) => {
                            return json_error_response(req, err, Status::ServiceUnavailable);
                        }
                        BError::Repo(RepoError::NotFound) => {
                            return json_error_response(req, err, Status::NotFound);
                        }
                        _ => {}
                    }
                }
                error!("Error: {err}");
                json_error_response(req, &err, Status::InternalServerError)
            }
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => {
                error!("Error: {err}");
                json_error_response(req, &err, Status::InternalServerError)
            }
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
