//! Instruments, their audio samples, and what those samples contain

use super::{
    require, require_id, require_minimum, require_non_zero, Entity, InstrumentState,
    InstrumentType, Library, SqlValue, User,
};
use crate::db::schema_sync::{ColumnDefinition, TableSchema};
use crate::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn instrument_id_column() -> ColumnDefinition {
    ColumnDefinition::new("instrument_id", "TEXT").not_null().references("instruments")
}

fn instrument_audio_id_column() -> ColumnDefinition {
    ColumnDefinition::new("instrument_audio_id", "TEXT")
        .not_null()
        .references("instrument_audios")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: Uuid,
    pub user_id: Uuid,
    pub library_id: Uuid,
    pub instrument_type: InstrumentType,
    pub state: InstrumentState,
    pub name: String,
    pub density: f64,
}

impl Instrument {
    pub fn create(
        user: &User,
        library: &Library,
        instrument_type: InstrumentType,
        state: InstrumentState,
        name: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user.id,
            library_id: library.id,
            instrument_type,
            state,
            name: name.to_string(),
            density: 0.6,
        }
    }
}

impl TableSchema for Instrument {
    fn table_name() -> &'static str {
        "instruments"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            ColumnDefinition::new("user_id", "TEXT").not_null().references("users"),
            ColumnDefinition::new("library_id", "TEXT").not_null().references("libraries"),
            ColumnDefinition::new("type", "TEXT").not_null(),
            ColumnDefinition::new("state", "TEXT").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("density", "REAL").not_null().default("0.6"),
        ]
    }
}

impl Entity for Instrument {
    const KIND: &'static str = "Instrument";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.user_id, "User ID")?;
        require_id(&self.library_id, "Library ID")?;
        require(&self.name, "Name")?;
        require_minimum(0.0, self.density, "density")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.user_id.into(),
            self.library_id.into(),
            self.instrument_type.as_str().into(),
            self.state.as_str().into(),
            (&self.name).into(),
            self.density.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentMeme {
    pub id: Uuid,
    pub instrument_id: Uuid,
    pub name: String,
}

impl InstrumentMeme {
    pub fn create(instrument: &Instrument, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: instrument.id,
            name: name.to_string(),
        }
    }
}

impl TableSchema for InstrumentMeme {
    fn table_name() -> &'static str {
        "instrument_memes"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            instrument_id_column(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for InstrumentMeme {
    const KIND: &'static str = "InstrumentMeme";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.instrument_id, "Instrument ID")?;
        require(&self.name, "Name")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.into(), self.instrument_id.into(), (&self.name).into()]
    }
}

/// One audio sample of an instrument
///
/// `start` and `length` are seconds into the waveform; `pitch` is the root
/// frequency in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAudio {
    pub id: Uuid,
    pub instrument_id: Uuid,
    pub name: String,
    pub waveform_key: String,
    pub start: f64,
    pub length: f64,
    pub tempo: f64,
    pub pitch: f64,
    pub density: f64,
}

impl InstrumentAudio {
    #[allow(clippy::too_many_arguments)]
    pub fn create(
        instrument: &Instrument,
        name: &str,
        waveform_key: &str,
        start: f64,
        length: f64,
        tempo: f64,
        pitch: f64,
        density: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: instrument.id,
            name: name.to_string(),
            waveform_key: waveform_key.to_string(),
            start,
            length,
            tempo,
            pitch,
            density,
        }
    }
}

impl TableSchema for InstrumentAudio {
    fn table_name() -> &'static str {
        "instrument_audios"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            instrument_id_column(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("waveform_key", "TEXT").not_null(),
            ColumnDefinition::new("start", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("length", "REAL").not_null().default("0.0"),
            ColumnDefinition::new("tempo", "REAL").not_null(),
            ColumnDefinition::new("pitch", "REAL").not_null(),
            ColumnDefinition::new("density", "REAL").not_null().default("0.6"),
        ]
    }
}

impl Entity for InstrumentAudio {
    const KIND: &'static str = "InstrumentAudio";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.instrument_id, "Instrument ID")?;
        require(&self.name, "Name")?;
        require(&self.waveform_key, "Waveform key")?;
        require_minimum(0.0, self.start, "Start")?;
        require_minimum(0.0, self.length, "Length")?;
        require_non_zero(self.tempo, "tempo")?;
        require_non_zero(self.pitch, "root pitch")?;
        require_minimum(0.0, self.density, "density")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.instrument_id.into(),
            (&self.name).into(),
            (&self.waveform_key).into(),
            self.start.into(),
            self.length.into(),
            self.tempo.into(),
            self.pitch.into(),
            self.density.into(),
        ]
    }
}

/// Onset within an audio sample, named by the track it can voice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAudioEvent {
    pub id: Uuid,
    pub instrument_id: Uuid,
    pub instrument_audio_id: Uuid,
    pub position: f64,
    pub duration: f64,
    pub name: String,
    pub note: String,
    pub velocity: f64,
}

impl InstrumentAudioEvent {
    pub fn create(
        audio: &InstrumentAudio,
        position: f64,
        duration: f64,
        name: &str,
        note: &str,
        velocity: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: audio.instrument_id,
            instrument_audio_id: audio.id,
            position,
            duration,
            name: name.to_string(),
            note: note.to_string(),
            velocity,
        }
    }
}

impl TableSchema for InstrumentAudioEvent {
    fn table_name() -> &'static str {
        "instrument_audio_events"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            instrument_id_column(),
            instrument_audio_id_column(),
            ColumnDefinition::new("position", "REAL").not_null(),
            ColumnDefinition::new("duration", "REAL").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("note", "TEXT").not_null(),
            ColumnDefinition::new("velocity", "REAL").not_null(),
        ]
    }
}

impl Entity for InstrumentAudioEvent {
    const KIND: &'static str = "InstrumentAudioEvent";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.instrument_id, "Instrument ID")?;
        require_id(&self.instrument_audio_id, "Audio ID")?;
        require(&self.name, "Name")?;
        require(&self.note, "Note")?;
        require_minimum(0.0, self.position, "Position")?;
        require_minimum(0.0, self.duration, "Duration")?;
        require_minimum(0.0, self.velocity, "Velocity")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.instrument_id.into(),
            self.instrument_audio_id.into(),
            self.position.into(),
            self.duration.into(),
            (&self.name).into(),
            (&self.note).into(),
            self.velocity.into(),
        ]
    }
}

/// Chord sounding at a beat position within an audio sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentAudioChord {
    pub id: Uuid,
    pub instrument_id: Uuid,
    pub instrument_audio_id: Uuid,
    pub position: f64,
    pub name: String,
}

impl InstrumentAudioChord {
    pub fn create(audio: &InstrumentAudio, position: f64, name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            instrument_id: audio.instrument_id,
            instrument_audio_id: audio.id,
            position,
            name: name.to_string(),
        }
    }
}

impl TableSchema for InstrumentAudioChord {
    fn table_name() -> &'static str {
        "instrument_audio_chords"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::id(),
            instrument_id_column(),
            instrument_audio_id_column(),
            ColumnDefinition::new("position", "REAL").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
        ]
    }
}

impl Entity for InstrumentAudioChord {
    const KIND: &'static str = "InstrumentAudioChord";

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> Result<()> {
        require_id(&self.instrument_id, "Instrument ID")?;
        require_id(&self.instrument_audio_id, "Audio ID")?;
        require(&self.name, "Name")?;
        require_minimum(0.0, self.position, "Position")
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.instrument_id.into(),
            self.instrument_audio_id.into(),
            self.position.into(),
            (&self.name).into(),
        ]
    }
}
