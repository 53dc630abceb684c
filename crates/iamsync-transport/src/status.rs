//! Registry of HTTP status codes returned by the management APIs

/// Human-readable cause for a status code, with a generic fallback.
pub fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request. The request is invalid or the resource content is malformed.",
        401 => "Unauthorized. Check the configured credentials.",
        403 => "Forbidden. The user is not permitted to perform this operation.",
        404 => "Not Found. The resource does not exist on the server.",
        409 => "Conflict. A resource with the same identity already exists.",
        500 => "Internal Server Error. Check the server logs.",
        _ => "Unexpected response from the server.",
    }
}
