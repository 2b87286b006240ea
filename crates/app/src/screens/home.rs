//! Static landing tab

/// Landing tab shown right after login. Issues no requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomeScreen;

impl HomeScreen {
    pub const TITLE: &'static str = "SweeperKeeper";
    pub const SUBTITLE: &'static str = "Your Social Casino Companion";
}
