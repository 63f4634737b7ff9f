use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SlideKey(String);

crate::impl_string_newtype!(SlideKey);

/// What a card shows. The layout engine never looks inside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlidePayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slide<P = SlidePayload> {
    pub key: SlideKey,
    pub payload: P,
}

impl<P> Slide<P> {
    pub fn new(key: impl Into<String>, payload: P) -> Self {
        Self {
            key: SlideKey::new(key),
            payload,
        }
    }
}
