//! Startup gate
//!
//! The header and footer fragments are injected by custom elements that
//! fire `header-loaded` / `footer-loaded`. The app starts once both have
//! arrived, or when the fallback timer fires, whichever comes first.

use crate::error::SiteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Header,
    Footer,
}

impl Fragment {
    pub fn loaded_event(&self) -> &'static str {
        match self {
            Fragment::Header => "header-loaded",
            Fragment::Footer => "footer-loaded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupGate {
    header: bool,
    footer: bool,
    launched: bool,
}

impl StartupGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fragment; `true` means start the app now
    pub fn on_loaded(&mut self, fragment: Fragment) -> bool {
        match fragment {
            Fragment::Header => self.header = true,
            Fragment::Footer => self.footer = true,
        }
        self.try_launch(self.header && self.footer)
    }

    /// Fallback timer fired; `true` means start the app now. Fragments that
    /// never signalled are logged as load failures.
    pub fn on_timeout(&mut self) -> bool {
        if !self.launched {
            for fragment in self.missing() {
                let err = SiteError::FragmentLoad {
                    name: fragment.loaded_event().trim_end_matches("-loaded").to_string(),
                    reason: "no loaded signal before the fallback timer".to_string(),
                };
                log::warn!("{err}, starting anyway");
            }
        }
        self.try_launch(true)
    }

    /// Fragments still waited on
    pub fn missing(&self) -> Vec<Fragment> {
        [(Fragment::Header, self.header), (Fragment::Footer, self.footer)]
            .into_iter()
            .filter(|(_, loaded)| !loaded)
            .map(|(fragment, _)| fragment)
            .collect()
    }

    fn try_launch(&mut self, ready: bool) -> bool {
        if ready && !self.launched {
            self.launched = true;
            true
        } else {
            false
        }
    }
}
