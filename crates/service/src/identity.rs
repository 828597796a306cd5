use pda_kie_core::{AuthenticatedUser, Connection};

/// The identity engine calls run under: the authenticated requester when one
/// is present, otherwise the connection's own user (service-account mode).
pub(crate) fn effective_username<'a>(
    connection: &'a Connection,
    user: Option<&'a AuthenticatedUser>,
) -> &'a str {
    user.map_or(connection.username.as_str(), |u| u.username.as_str())
}
