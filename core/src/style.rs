use std::fmt;

/// Somewhere stylesheet links can be attached, e.g. `document.head`.
pub trait StylesheetHost {
    type Link;
    type Error: fmt::Display;

    fn insert(&self, href: &str) -> Result<Self::Link, Self::Error>;
    fn remove(&self, link: Self::Link);
}

#[derive(Debug, thiserror::Error)]
#[error("failed to attach stylesheet {href:?}: {message}")]
pub struct StyleError {
    pub href: String,
    pub message: String,
}

/// Holds at most one attached stylesheet and swaps it on demand.
pub struct StyleApplier<H: StylesheetHost> {
    host: H,
    active: Option<ActiveLink<H::Link>>,
}

struct ActiveLink<L> {
    href: String,
    link: L,
}

impl<H: StylesheetHost> StyleApplier<H> {
    pub fn new(host: H) -> Self {
        Self { host, active: None }
    }

    pub fn active_href(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.href.as_str())
    }

    /// Releases the held link, then attaches `href` if given.
    pub fn apply_style(&mut self, href: Option<&str>) -> Result<(), StyleError> {
        self.release();
        let Some(href) = href else {
            return Ok(());
        };
        let link = self.host.insert(href).map_err(|err| StyleError {
            href: href.to_string(),
            message: err.to_string(),
        })?;
        self.active = Some(ActiveLink {
            href: href.to_string(),
            link,
        });
        Ok(())
    }

    pub fn release(&mut self) {
        if let Some(active) = self.active.take() {
            self.host.remove(active.link);
        }
    }
}

impl<H: StylesheetHost> Drop for StyleApplier<H> {
    fn drop(&mut self) {
        self.release();
    }
}
