//! Session cookie transport: attach a proof on login, clear it on logout.
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::session::SessionProof;
use crate::config::Settings;

/// Build the cookie carrying `proof`
pub fn session_cookie(proof: &SessionProof, settings: &Settings) -> Cookie<'static> {
    let max_age = time::Duration::seconds(settings.session_ttl_secs.try_into().unwrap_or(i64::MAX));
    Cookie::build((settings.cookie_name.clone(), proof.token.clone()))
        .path("/")
        .http_only(true)
        .secure(settings.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

/// Add the session cookie to the response jar
pub fn attach(jar: CookieJar, proof: &SessionProof, settings: &Settings) -> CookieJar {
    jar.add(session_cookie(proof, settings))
}

/// Clear the session cookie.
///
/// Always emits a removal cookie, whether or not the client sent one.
pub fn destroy(jar: CookieJar, settings: &Settings) -> CookieJar {
    let mut removal = Cookie::build((settings.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(settings.cookie_secure)
        .same_site(SameSite::Lax)
        .build();
    removal.make_removal();
    jar.add(removal)
}
