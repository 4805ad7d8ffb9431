use super::*;

#[get("/server/version")]
pub fn get_version(version: &State<Version>) -> &'static str {
    version.0
}

#[get("/server/openapi.yaml")]
pub fn get_api() -> (ContentType, &'static str) {
    let data = include_str!("../../../openapi.yaml");
    let c_type = ContentType::new("text", "yaml");
    (c_type, data)
}
