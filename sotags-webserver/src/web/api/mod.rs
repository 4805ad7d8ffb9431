use std::{fmt::Display, result};

use rocket::{
    self, get,
    http::{ContentType, Status},
    post,
    response::{self, Responder},
    routes,
    serde::json::Json,
    Route, State,
};
use sotags_boundary::Error as JsonErrorResponse;

use super::{guards::*, sqlite, Cfg};
use crate::adapters::json::{self, to_json};
use sotags_application::{
    error::{AppError, BError},
    prelude as flows,
};
use sotags_core::usecases::Error as ParameterError;

mod error;
mod tags;
mod util;

pub use self::error::Error as ApiError;


type Result<T> = result::Result<Json<T>, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   tags   --- //
        tags::get_tags,
        tags::post_tags_refresh,
        // ---   server   --- //
        util::get_version,
        util::get_api,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let message = err.to_string();
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message,
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}
