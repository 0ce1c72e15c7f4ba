use crate::auth::SessionIssuer;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::{Duration, OffsetDateTime};

pub(crate) const SESSION_COOKIE: &str = "token";

pub(crate) fn session_cookie(token: String, issuer: &SessionIssuer) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(issuer.cookie_secure())
        .max_age(Duration::seconds(issuer.ttl().num_seconds()))
        .build()
}

/// Overwrites the session cookie with an empty, already expired one.
pub(crate) fn logout_cookie(issuer: &SessionIssuer) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(issuer.cookie_secure())
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

pub(crate) fn session_token(jar: &CookieJar) -> Option<&str> {
    jar.get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionConfig;
    use chrono::TimeDelta;

    fn issuer(cookie_secure: bool) -> SessionIssuer {
        SessionIssuer::new(&SessionConfig {
            secret: "secret".to_owned(),
            cookie_secure,
            token_ttl: TimeDelta::days(30),
        })
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("abc".to_owned(), &issuer(true));
        assert_eq!(cookie.name(), "token");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::days(30)));
    }

    #[test]
    fn test_logout_cookie_is_expired() {
        let cookie = logout_cookie(&issuer(false));
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.expires_datetime(), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, ""));
        assert_eq!(session_token(&jar), None);
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "abc"));
        assert_eq!(session_token(&jar), Some("abc"));
    }
}
