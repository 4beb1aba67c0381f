/// The scroll position and viewport geometry of a list instance.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    /// Current scroll offset in pixels.
    pub offset: u64,
    pub viewport_height: u32,
    /// Number of estimated-height items needed to cover the viewport.
    pub client_capacity: usize,
}

impl ViewportState {
    pub(crate) fn with_height(offset: u64, viewport_height: u32, item_height: u32) -> Self {
        Self {
            offset,
            viewport_height,
            client_capacity: client_capacity(viewport_height, item_height),
        }
    }

    pub(crate) fn resize(&mut self, viewport_height: u32, item_height: u32) {
        self.viewport_height = viewport_height;
        self.client_capacity = client_capacity(viewport_height, item_height);
    }
}

/// `ceil(viewport_height / item_height)`.
pub fn client_capacity(viewport_height: u32, item_height: u32) -> usize {
    viewport_height.div_ceil(item_height.max(1)) as usize
}
