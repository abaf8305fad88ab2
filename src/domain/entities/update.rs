/// Where a state change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// User interaction inside the app; mirrored into the URL.
    Local,
    /// Read from the URL or caused by navigation; never written back.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update<T> {
    pub origin: Origin,
    pub value: T,
}

impl<T> Update<T> {
    pub fn local(value: T) -> Self {
        Self {
            origin: Origin::Local,
            value,
        }
    }

    pub fn external(value: T) -> Self {
        Self {
            origin: Origin::External,
            value,
        }
    }
}
