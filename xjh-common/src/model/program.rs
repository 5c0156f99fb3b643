//! Programs and their composition hierarchy
//!
//! A Program owns Sequences, placed in time by Bindings which carry Memes.
//! Voices carry Tracks; Patterns (one Sequence, one Voice) carry timed Events
//! on those Tracks. Every child record also stores its owning `program_id`.

use super::{
    require, require_id, require_minimum, require_non_zero, require_same_owner, Entity, InstrumentType, Library,
    ProgramSequencePatternType, ProgramState, ProgramType, SqlValue, User,
};
use crate::db::schema_sync::{ColumnDefinition, TableSchema};
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn program_id_column() -> ColumnDefinition {
    ColumnDefinition::new("program_id", "TEXT").not_null().references("programs")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: Uuid,
    pub user_id: Uuid,
    pub library_id: Uuid,
    pub program_type: ProgramType,
    pub state: ProgramState,
    pub name: String,
    pub key: String,
    pub tempo: f64,
    pub density: f64,
}

impl Program {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        user: &User,
        library: &Library,
        program_type: ProgramType,
        state: ProgramState,
        name: &str,
        key: &str,
        tempo: f64,
        density: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            library_id: library.id,
            program_type,
            state,
            name: name.to_string(),
            key: key.to_string(),
            tempo,
            density,
        }
    }
}

impl TableSchema for Program {
    fn table_name() -> &'static str {
        "programs"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("user_id", "TEXT").not_null().references("users"),
            ColumnDefinition::new("library_id", "TEXT").not_null().references("libraries"),
            ColumnDefinition::new("type", "TEXT").not_null(),
            ColumnDefinition::new("state", "TEXT").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("key", "TEXT").not_null(),
            ColumnDefinition::new("tempo", "REAL").not_null(),
            ColumnDefinition::new("density", "REAL").not_null(),
        ]
    }
}

impl Entity for Program {
    const KIND: &'static str = "Program";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.user_id, "User ID")?;
        require_id(&self.library_id, "Library ID")?;
        require(&self.name, "Name")?;
        require(&self.key, "Key")?;
        require_non_zero(self.tempo, "tempo")?;
        require_minimum(0.0, self.density, "density")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.user_id.into(),
            self.library_id.into(),
            self.program_type.as_str().into(),
            self.state.as_str().into(),
            (&self.name).into(),
            (&self.key).into(),
            self.tempo.into(),
            self.density.into(),
        ]
    }
}

/// Mood/style tag on a whole program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramMeme {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
}

impl ProgramMeme {
    pub fn create(program: &Program, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: program.id,
            name: name.to_string(),
        }
    }
}

impl TableSchema for ProgramMeme {
    fn table_name() -> &'static str {
        "program_memes"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramMeme {
    const KIND: &'static str = "ProgramMeme";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.program_id.into(), (&self.name).into()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramVoice {
    pub id: Uuid,
    pub program_id: Uuid,
    pub voice_type: InstrumentType,
    pub name: String,
}

impl ProgramVoice {
    pub fn create(program: &Program, voice_type: InstrumentType, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: program.id,
            voice_type,
            name: name.to_string(),
        }
    }
}

impl TableSchema for ProgramVoice {
    fn table_name() -> &'static str {
        "program_voices"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("type", "TEXT").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramVoice {
    const KIND: &'static str = "ProgramVoice";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.voice_type.as_str().into(),
            (&self.name).into(),
        ]
    }
}

/// Named lane within a voice (e.g. KICK, SNARE) that events are placed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramVoiceTrack {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_voice_id: Uuid,
    pub name: String,
}

impl ProgramVoiceTrack {
    pub fn create(voice: &ProgramVoice, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: voice.program_id,
            program_voice_id: voice.id,
            name: name.to_string(),
        }
    }
}

impl TableSchema for ProgramVoiceTrack {
    fn table_name() -> &'static str {
        "program_voice_tracks"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_voice_id", "TEXT")
                .not_null()
                .references("program_voices"),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramVoiceTrack {
    const KIND: &'static str = "ProgramVoiceTrack";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_voice_id, "Voice ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_voice_id.into(),
            (&self.name).into(),
        ]
    }
}

/// A span of `total` beats with its own key, tempo and density
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequence {
    pub id: Uuid,
    pub program_id: Uuid,
    pub name: String,
    pub key: String,
    pub density: f64,
    pub tempo: f64,
    pub total: i32,
}

impl ProgramSequence {
    pub fn create(program: &Program, total: i32, name: &str, density: f64, key: &str, tempo: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: program.id,
            name: name.to_string(),
            key: key.to_string(),
            density,
            tempo,
            total,
        }
    }
}

impl TableSchema for ProgramSequence {
    fn table_name() -> &'static str {
        "program_sequences"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("key", "TEXT").not_null(),
            ColumnDefinition::new("density", "REAL").not_null(),
            ColumnDefinition::new("tempo", "REAL").not_null(),
            ColumnDefinition::new("total", "INTEGER").not_null(),
        ]
    }
}

impl Entity for ProgramSequence {
    const KIND: &'static str = "ProgramSequence";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require(&self.name, "Name")?;
        require(&self.key, "Key")?;
        require_non_zero(self.tempo, "tempo")?;
        require_non_zero(self.total.into(), "total")?;
        require_minimum(0.0, self.density, "density")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            (&self.name).into(),
            (&self.key).into(),
            self.density.into(),
            self.tempo.into(),
            self.total.into(),
        ]
    }
}

/// Placement of a sequence at an offset in the program's arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequenceBinding {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_sequence_id: Uuid,
    pub offset: i64,
}

impl ProgramSequenceBinding {
    pub fn create(sequence: &ProgramSequence, offset: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: sequence.program_id,
            program_sequence_id: sequence.id,
            offset,
        }
    }
}

impl TableSchema for ProgramSequenceBinding {
    fn table_name() -> &'static str {
        "program_sequence_bindings"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_sequence_id", "TEXT")
                .not_null()
                .references("program_sequences"),
            ColumnDefinition::new("offset", "INTEGER").not_null(),
        ]
    }
}

impl Entity for ProgramSequenceBinding {
    const KIND: &'static str = "ProgramSequenceBinding";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_sequence_id, "Sequence ID")?;
        require_minimum(0.0, self.offset as f64, "Offset")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_sequence_id.into(),
            self.offset.into(),
        ]
    }
}

/// Mood/style tag on one binding, steering which sequence plays at that offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequenceBindingMeme {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_sequence_binding_id: Uuid,
    pub name: String,
}

impl ProgramSequenceBindingMeme {
    pub fn create(binding: &ProgramSequenceBinding, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: binding.program_id,
            program_sequence_binding_id: binding.id,
            name: name.to_string(),
        }
    }
}

impl TableSchema for ProgramSequenceBindingMeme {
    fn table_name() -> &'static str {
        "program_sequence_binding_memes"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_sequence_binding_id", "TEXT")
                .not_null()
                .references("program_sequence_bindings"),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramSequenceBindingMeme {
    const KIND: &'static str = "ProgramSequenceBindingMeme";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_sequence_binding_id, "Sequence Binding ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_sequence_binding_id.into(),
            (&self.name).into(),
        ]
    }
}

/// Chord symbol at a beat position within a sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequenceChord {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_sequence_id: Uuid,
    pub position: f64,
    pub name: String,
}

impl ProgramSequenceChord {
    pub fn create(sequence: &ProgramSequence, position: f64, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            program_id: sequence.program_id,
            program_sequence_id: sequence.id,
            position,
            name: name.to_string(),
        }
    }
}

impl TableSchema for ProgramSequenceChord {
    fn table_name() -> &'static str {
        "program_sequence_chords"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_sequence_id", "TEXT")
                .not_null()
                .references("program_sequences"),
            ColumnDefinition::new("position", "REAL").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramSequenceChord {
    const KIND: &'static str = "ProgramSequenceChord";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_sequence_id, "Sequence ID")?;
        require(&self.name, "Name")?;
        require_minimum(0.0, self.position, "Position")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_sequence_id.into(),
            self.position.into(),
            (&self.name).into(),
        ]
    }
}

/// Voiced pattern of `total` beats, played by one voice within one sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequencePattern {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_sequence_id: Uuid,
    pub program_voice_id: Uuid,
    pub pattern_type: ProgramSequencePatternType,
    pub total: i32,
    pub name: String,
}

impl ProgramSequencePattern {
    /// Fails when the sequence and voice belong to different programs
    pub fn create(
        sequence: &ProgramSequence,
        voice: &ProgramVoice,
        pattern_type: ProgramSequencePatternType,
        total: i32,
        name: &str,
    ) -> Result<Self> {
        require_same_owner(
            "Pattern",
            ("sequence", sequence.program_id),
            ("voice", voice.program_id),
            "program",
        )?;
        Ok(Self {
            id: Uuid::new_v4(),
            program_id: sequence.program_id,
            program_sequence_id: sequence.id,
            program_voice_id: voice.id,
            pattern_type,
            total,
            name: name.to_string(),
        })
    }
}

impl TableSchema for ProgramSequencePattern {
    fn table_name() -> &'static str {
        "program_sequence_patterns"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_sequence_id", "TEXT")
                .not_null()
                .references("program_sequences"),
            ColumnDefinition::new("program_voice_id", "TEXT")
                .not_null()
                .references("program_voices"),
            ColumnDefinition::new("type", "TEXT").not_null(),
            ColumnDefinition::new("total", "INTEGER").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for ProgramSequencePattern {
    const KIND: &'static str = "ProgramSequencePattern";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_sequence_id, "Sequence ID")?;
        require_id(&self.program_voice_id, "Voice ID")?;
        require(&self.name, "Name")?;
        require_non_zero(self.total.into(), "total")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_sequence_id.into(),
            self.program_voice_id.into(),
            self.pattern_type.as_str().into(),
            self.total.into(),
            (&self.name).into(),
        ]
    }
}

/// Note on a track at a beat position within a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSequencePatternEvent {
    pub id: Uuid,
    pub program_id: Uuid,
    pub program_sequence_pattern_id: Uuid,
    pub program_voice_track_id: Uuid,
    pub position: f64,
    pub duration: f64,
    pub note: String,
    pub velocity: f64,
}

impl ProgramSequencePatternEvent {
    /// Fails when the track is not on the pattern's voice
    pub fn create(
        pattern: &ProgramSequencePattern,
        track: &ProgramVoiceTrack,
        position: f64,
        duration: f64,
        note: &str,
        velocity: f64,
    ) -> Result<Self> {
        require_same_owner(
            "Event",
            ("pattern", pattern.program_voice_id),
            ("track", track.program_voice_id),
            "voice",
        )?;
        Ok(Self {
            id: Uuid::new_v4(),
            program_id: pattern.program_id,
            program_sequence_pattern_id: pattern.id,
            program_voice_track_id: track.id,
            position,
            duration,
            note: note.to_string(),
            velocity,
        })
    }
}

impl TableSchema for ProgramSequencePatternEvent {
    fn table_name() -> &'static str {
        "program_sequence_pattern_events"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            program_id_column(),
            ColumnDefinition::new("program_sequence_pattern_id", "TEXT")
                .not_null()
                .references("program_sequence_patterns"),
            ColumnDefinition::new("program_voice_track_id", "TEXT")
                .not_null()
                .references("program_voice_tracks"),
            ColumnDefinition::new("position", "REAL").not_null(),
            ColumnDefinition::new("duration", "REAL").not_null(),
            ColumnDefinition::new("note", "TEXT").not_null(),
            ColumnDefinition::new("velocity", "REAL").not_null(),
        ]
    }
}

impl Entity for ProgramSequencePatternEvent {
    const KIND: &'static str = "ProgramSequencePatternEvent";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.program_id, "Program ID")?;
        require_id(&self.program_sequence_pattern_id, "Pattern ID")?;
        require_id(&self.program_voice_track_id, "Track ID")?;
        require(&self.note, "Note")?;
        require_minimum(0.0, self.position, "Position")?;
        require_minimum(0.0, self.duration, "Duration")?;
        require_minimum(0.0, self.velocity, "Velocity")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.program_id.into(),
            self.program_sequence_pattern_id.into(),
            self.program_voice_track_id.into(),
            self.position.into(),
            self.duration.into(),
            (&self.note).into(),
            self.velocity.into(),
        ]
    }
}
