use indexmap::IndexMap;

/// A trending-channel shortcut shown next to the channel input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPreset {
    pub channel_name: String,
    pub niche_hint: String,
}

/// Ordered registry of channel shortcuts. Insertion order is display
/// order; lookup is case-insensitive on the channel name.
#[derive(Debug, Clone)]
pub struct ChannelPresets {
    presets: IndexMap<String, ChannelPreset>,
}

impl Default for ChannelPresets {
    fn default() -> Self {
        let mut presets = IndexMap::new();
        let mut insert = |channel_name: &str, niche_hint: &str| {
            presets.insert(
                channel_name.to_ascii_lowercase(),
                ChannelPreset {
                    channel_name: channel_name.to_string(),
                    niche_hint: niche_hint.to_string(),
                },
            );
        };
        insert("Nne's Folktales", "African Folktales");
        insert("African Animation", "Animation / Storytelling");
        Self { presets }
    }
}

impl ChannelPresets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ChannelPreset> {
        self.presets.get(&name.trim().to_ascii_lowercase())
    }

    pub fn list(&self) -> impl Iterator<Item = &ChannelPreset> {
        self.presets.values()
    }
}
