//! Data model for the emoji collection
//!
//! This module defines the entities persisted by the store:
//! - [`Emoji`]: a single image item, identified by its UUID
//! - [`UngroupedEmoji`]: an emoji living outside any group
//! - [`EmojiGroup`]: a named, ordered collection of emojis
//! - [`Settings`] / [`SettingsPatch`]: global display configuration
//! - [`PersistPayload`]: the single unit of persistence
//!
//! and the [`HotEmoji`] view produced by the ranking cache.
//!
//! Field names on the wire follow the extension's JSON layout
//! (`UUID`, `displayName`, `MobileMode`, ...), which is why most fields
//! carry an explicit serde rename.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// UUID of the reserved "common emojis" group.
///
/// When present it is always reported first by ordered group reads.
pub const COMMON_GROUP_UUID: &str = "common-emoji-group";

/// Group annotation used for hot emojis that come from the ungrouped list.
pub const UNGROUPED_GROUP_UUID: &str = "ungrouped";

/// Default value of [`Settings::default_emoji_group_uuid`].
pub const NIL_GROUP_UUID: &str = "00000000-0000-0000-0000-000000000000";

/// Valid range for [`Settings::grid_columns`].
pub const GRID_COLUMNS_RANGE: std::ops::RangeInclusive<u8> = 1..=11;

/// Valid range for [`Settings::image_scale`].
pub const IMAGE_SCALE_RANGE: std::ops::RangeInclusive<u32> = 1..=500;

/// Generate a fresh random UUID string for new groups and emojis.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Emoji
// =============================================================================

/// A single emoji/sticker image.
///
/// Identity is `uuid`; `id` is a legacy secondary key kept for imports.
/// `last_used` is set iff `usage_count` has been incremented since the
/// last reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Emoji {
    /// Legacy identifier
    #[serde(default)]
    pub id: String,
    /// Human-readable name
    #[serde(default)]
    pub display_name: String,
    /// URL inserted into posts
    #[serde(default)]
    pub real_url: String,
    /// URL shown in the picker (often a thumbnail)
    #[serde(default)]
    pub display_url: String,
    /// Position hint inside the owning collection
    #[serde(default)]
    pub order: i64,
    /// Primary identity
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Decayed usage counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,
    /// Last usage time (millis since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<i64>,
    /// Fields this version does not interpret (`packet`, `width`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Emoji {
    /// Create an emoji with a fresh UUID, using `url` for both URLs.
    pub fn new(display_name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self::with_uuid(new_uuid(), display_name, url)
    }

    /// Create an emoji with an explicit UUID.
    pub fn with_uuid(
        uuid: impl Into<String>,
        display_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        let uuid = uuid.into();
        let url = url.into();
        Self {
            id: uuid.clone(),
            display_name: display_name.into(),
            real_url: url.clone(),
            display_url: url,
            order: 0,
            uuid,
            usage_count: None,
            last_used: None,
            extra: Map::new(),
        }
    }

    /// Usage count, treating an absent counter as zero.
    pub fn usage(&self) -> u32 {
        self.usage_count.unwrap_or(0)
    }

    /// Clear usage statistics.
    pub fn reset_usage(&mut self) {
        self.usage_count = Some(0);
        self.last_used = None;
    }
}

/// An emoji that is not assigned to any group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UngroupedEmoji {
    /// The emoji itself
    #[serde(flatten)]
    pub emoji: Emoji,
    /// When the item entered the ungrouped list (millis since epoch)
    #[serde(rename = "addedAt", default)]
    pub added_at: i64,
}

impl UngroupedEmoji {
    /// Wrap an emoji with its insertion time.
    pub fn new(mut emoji: Emoji, added_at: i64) -> Self {
        emoji.extra.remove("addedAt");
        Self { emoji, added_at }
    }

    /// UUID of the wrapped emoji.
    pub fn uuid(&self) -> &str {
        &self.emoji.uuid
    }

    /// Unwrap into the plain emoji, dropping `added_at`.
    pub fn into_emoji(self) -> Emoji {
        self.emoji
    }
}

/// Ranked view of an emoji, annotated with the group it was found in.
///
/// Produced only by the hot ranking cache; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotEmoji {
    /// Snapshot of the emoji at ranking time
    #[serde(flatten)]
    pub emoji: Emoji,
    /// Owning group UUID or [`UNGROUPED_GROUP_UUID`]
    #[serde(rename = "groupUUID")]
    pub group_uuid: String,
}

impl HotEmoji {
    /// True when the emoji came from the ungrouped list.
    pub fn is_ungrouped(&self) -> bool {
        self.group_uuid == UNGROUPED_GROUP_UUID
    }
}

// =============================================================================
// EmojiGroup
// =============================================================================

/// A named, ordered collection of emojis with its own icon.
///
/// Unknown persisted fields are kept in `extra` so that a load/save cycle
/// does not drop data written by newer clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiGroup {
    /// Primary identity
    #[serde(rename = "UUID")]
    pub uuid: String,
    /// Emoji glyph or image URL
    #[serde(default)]
    pub icon: String,
    /// Human-readable name
    #[serde(default)]
    pub display_name: String,
    /// Ordered members
    #[serde(default)]
    pub emojis: Vec<Emoji>,
    /// Position hint among groups
    #[serde(default)]
    pub order: i64,
    /// Legacy identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier in the source the group was imported from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    /// Fields this version does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmojiGroup {
    /// Create an empty group with a fresh UUID.
    pub fn new(display_name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self::with_uuid(new_uuid(), display_name, icon)
    }

    /// Create an empty group with an explicit UUID.
    pub fn with_uuid(
        uuid: impl Into<String>,
        display_name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            icon: icon.into(),
            display_name: display_name.into(),
            emojis: Vec::new(),
            order: 0,
            id: None,
            original_id: None,
            extra: Map::new(),
        }
    }

    /// True for the reserved common group.
    pub fn is_common(&self) -> bool {
        self.uuid == COMMON_GROUP_UUID
    }

    /// Index of the emoji with the given UUID.
    pub fn position_of(&self, emoji_uuid: &str) -> Option<usize> {
        self.emojis.iter().position(|e| e.uuid == emoji_uuid)
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Format used when an emoji is inserted into a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<img>` tag
    Html,
    /// `![name](url)`
    #[default]
    Markdown,
    /// `[img]url[/img]`
    Bbcode,
}

/// Global configuration.
///
/// Deserialization fills every missing field from [`Settings::default`],
/// so persisted values override defaults field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Display scale in percent
    #[serde(rename = "imageScale")]
    pub image_scale: u32,
    /// Group selected when the picker opens
    #[serde(rename = "defaultEmojiGroupUUID")]
    pub default_emoji_group_uuid: String,
    /// Picker grid width, within [`GRID_COLUMNS_RANGE`]
    #[serde(rename = "gridColumns")]
    pub grid_columns: u8,
    /// Insertion format
    #[serde(rename = "outputFormat")]
    pub output_format: OutputFormat,
    /// Force the mobile layout
    #[serde(rename = "MobileMode")]
    pub mobile_mode: bool,
    /// Options-page sidebar state
    #[serde(rename = "sidebarCollapsed", skip_serializing_if = "Option::is_none")]
    pub sidebar_collapsed: Option<bool>,
    /// Time of the last save
    #[serde(rename = "lastModified", with = "iso_timestamp")]
    pub last_modified: DateTime<Utc>,
    /// Fields this version does not interpret (e.g. sync configuration)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_scale: 30,
            default_emoji_group_uuid: NIL_GROUP_UUID.to_string(),
            grid_columns: 4,
            output_format: OutputFormat::Markdown,
            mobile_mode: false,
            sidebar_collapsed: None,
            // Persisted with millisecond precision; keep defaults comparable
            // with their reloaded form.
            last_modified: DateTime::from_timestamp_millis(Utc::now().timestamp_millis())
                .unwrap_or_default(),
            extra: Map::new(),
        }
    }
}

/// Partial update for [`Settings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub image_scale: Option<u32>,
    pub default_emoji_group_uuid: Option<String>,
    pub grid_columns: Option<u8>,
    pub output_format: Option<OutputFormat>,
    pub mobile_mode: Option<bool>,
    pub sidebar_collapsed: Option<bool>,
    pub extra: Map<String, Value>,
}

impl SettingsPatch {
    /// Empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_scale(mut self, scale: u32) -> Self {
        self.image_scale = Some(scale);
        self
    }

    pub fn default_group(mut self, uuid: impl Into<String>) -> Self {
        self.default_emoji_group_uuid = Some(uuid.into());
        self
    }

    pub fn grid_columns(mut self, columns: u8) -> Self {
        self.grid_columns = Some(columns);
        self
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn mobile_mode(mut self, enabled: bool) -> Self {
        self.mobile_mode = Some(enabled);
        self
    }

    pub fn sidebar_collapsed(mut self, collapsed: bool) -> Self {
        self.sidebar_collapsed = Some(collapsed);
        self
    }

    /// Set an uninterpreted field.
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.image_scale.is_none()
            && self.default_emoji_group_uuid.is_none()
            && self.grid_columns.is_none()
            && self.output_format.is_none()
            && self.mobile_mode.is_none()
            && self.sidebar_collapsed.is_none()
            && self.extra.is_empty()
    }

    /// Shallow-merge this patch into `settings`.
    ///
    /// `last_modified` is not touched; it is stamped on save.
    pub fn apply_to(self, settings: &mut Settings) {
        if let Some(v) = self.image_scale {
            settings.image_scale = v;
        }
        if let Some(v) = self.default_emoji_group_uuid {
            settings.default_emoji_group_uuid = v;
        }
        if let Some(v) = self.grid_columns {
            settings.grid_columns = v;
        }
        if let Some(v) = self.output_format {
            settings.output_format = v;
        }
        if let Some(v) = self.mobile_mode {
            settings.mobile_mode = v;
        }
        if let Some(v) = self.sidebar_collapsed {
            settings.sidebar_collapsed = Some(v);
        }
        for (key, value) in self.extra {
            settings.extra.insert(key, value);
        }
    }
}

impl From<Settings> for SettingsPatch {
    fn from(s: Settings) -> Self {
        Self {
            image_scale: Some(s.image_scale),
            default_emoji_group_uuid: Some(s.default_emoji_group_uuid),
            grid_columns: Some(s.grid_columns),
            output_format: Some(s.output_format),
            mobile_mode: Some(s.mobile_mode),
            sidebar_collapsed: s.sidebar_collapsed,
            extra: s.extra,
        }
    }
}

// =============================================================================
// PersistPayload
// =============================================================================

/// Settings, groups and ungrouped items, read and written as one blob.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistPayload {
    #[serde(rename = "Settings", default)]
    pub settings: Settings,
    #[serde(rename = "emojiGroups", default)]
    pub emoji_groups: Vec<EmojiGroup>,
    #[serde(default)]
    pub ungrouped: Vec<UngroupedEmoji>,
}

impl PersistPayload {
    /// Assemble a payload from its parts.
    pub fn new(
        settings: Settings,
        emoji_groups: Vec<EmojiGroup>,
        ungrouped: Vec<UngroupedEmoji>,
    ) -> Self {
        Self {
            settings,
            emoji_groups,
            ungrouped,
        }
    }

    /// Total number of emojis across groups and the ungrouped list.
    pub fn emoji_count(&self) -> usize {
        self.emoji_groups.iter().map(|g| g.emojis.len()).sum::<usize>() + self.ungrouped.len()
    }
}

/// `lastModified` codec.
///
/// Writes the JavaScript `toISOString()` shape (`2024-05-01T10:00:00.000Z`)
/// and reads either an RFC 3339 string or legacy epoch millis. Unparseable
/// input decodes to the epoch instead of rejecting the whole payload.
mod iso_timestamp {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Millis(i64),
        Float(f64),
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let parsed = match Raw::deserialize(d)? {
            Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Raw::Millis(ms) => DateTime::from_timestamp_millis(ms),
            Raw::Float(ms) => DateTime::from_timestamp_millis(ms as i64),
        };
        Ok(parsed.unwrap_or_default())
    }
}
