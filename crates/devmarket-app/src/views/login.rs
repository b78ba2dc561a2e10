/// The redirect target for views that need an identity. Authentication
/// itself is owned by the external auth service; this client only carries
/// its session cookie.
pub fn render() -> String {
    "== Sign in required ==\n\
     This page needs an authenticated session. Log in through the DevMarket \
     web login, then restart the client so it picks up the session cookie.\n"
        .to_string()
}
