//! Seed documents
//!
//! A seed document lists records per content table, keyed by table name.
//! Records name their parents by a document-local `ref` rather than by id:
//!
//! ```toml
//! [[accounts]]
//! ref = "bananas"
//! name = "bananas"
//!
//! [[libraries]]
//! account = "bananas"
//! name = "house"
//! ```
//!
//! Records are inserted in table construction order, so a document may list
//! its sections in any order. A record may carry an explicit `id` to keep the
//! identity it had in the hub it was exported from.

use crate::seeder::Seeder;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;
use uuid::Uuid;
use xjh_common::model::*;
use xjh_common::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedDocument {
    pub users: Vec<UserRecord>,
    pub user_roles: Vec<UserRoleRecord>,
    pub accounts: Vec<AccountRecord>,
    pub account_users: Vec<AccountUserRecord>,
    pub libraries: Vec<LibraryRecord>,
    pub programs: Vec<ProgramRecord>,
    pub program_memes: Vec<ProgramMemeRecord>,
    pub program_voices: Vec<ProgramVoiceRecord>,
    pub program_voice_tracks: Vec<ProgramVoiceTrackRecord>,
    pub program_sequences: Vec<ProgramSequenceRecord>,
    pub program_sequence_bindings: Vec<ProgramSequenceBindingRecord>,
    pub program_sequence_binding_memes: Vec<ProgramSequenceBindingMemeRecord>,
    pub program_sequence_chords: Vec<ProgramSequenceChordRecord>,
    pub program_sequence_patterns: Vec<ProgramSequencePatternRecord>,
    pub program_sequence_pattern_events: Vec<ProgramSequencePatternEventRecord>,
    pub instruments: Vec<InstrumentRecord>,
    pub instrument_memes: Vec<InstrumentMemeRecord>,
    pub instrument_audios: Vec<InstrumentAudioRecord>,
    pub instrument_audio_events: Vec<InstrumentAudioEventRecord>,
    pub instrument_audio_chords: Vec<InstrumentAudioChordRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserRoleRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub user: String,
    #[serde(rename = "type")]
    pub role_type: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountUserRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub account: String,
    pub user: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub account: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub user: String,
    pub library: String,
    #[serde(rename = "type")]
    pub program_type: String,
    pub state: String,
    pub name: String,
    pub key: String,
    pub tempo: f64,
    #[serde(default = "default_density")]
    pub density: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramMemeRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub program: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramVoiceRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub program: String,
    #[serde(rename = "type")]
    pub voice_type: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramVoiceTrackRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub voice: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequenceRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub program: String,
    pub total: i32,
    pub name: String,
    #[serde(default = "default_density")]
    pub density: f64,
    pub key: String,
    pub tempo: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequenceBindingRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub sequence: String,
    pub offset: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequenceBindingMemeRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub binding: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequenceChordRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub sequence: String,
    pub position: f64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequencePatternRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub sequence: String,
    pub voice: String,
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub total: i32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSequencePatternEventRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub pattern: String,
    pub track: String,
    pub position: f64,
    pub duration: f64,
    pub note: String,
    pub velocity: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub user: String,
    pub library: String,
    #[serde(rename = "type")]
    pub instrument_type: String,
    pub state: String,
    pub name: String,
    #[serde(default = "default_density")]
    pub density: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentMemeRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub instrument: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentAudioRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub instrument: String,
    pub name: String,
    pub waveform_key: String,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub length: f64,
    pub tempo: f64,
    pub pitch: f64,
    #[serde(default = "default_density")]
    pub density: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentAudioEventRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub audio: String,
    pub position: f64,
    pub duration: f64,
    pub name: String,
    pub note: String,
    pub velocity: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstrumentAudioChordRecord {
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub id: Option<Uuid>,
    pub audio: String,
    pub position: f64,
    pub name: String,
}

fn default_density() -> f64 {
    0.6
}

/// Ref bookkeeping shared by every record type
trait Record {
    /// Entity kind this record becomes, which is also its ref namespace
    const KIND: &'static str;

    fn reference(&self) -> Option<&str>;

    /// `(parent kind, parent ref)` pairs
    fn parents(&self) -> Vec<(&'static str, &str)>;
}

macro_rules! record {
    ($record:ty => $entity:ty, [$($field:ident: $parent:ty),*]) => {
        impl Record for $record {
            const KIND: &'static str = <$entity as Entity>::KIND;

            fn reference(&self) -> Option<&str> {
                self.reference.as_deref()
            }

            fn parents(&self) -> Vec<(&'static str, &str)> {
                vec![$((<$parent as Entity>::KIND, self.$field.as_str())),*]
            }
        }
    };
}

record!(UserRecord => User, []);
record!(UserRoleRecord => UserRole, [user: User]);
record!(AccountRecord => Account, []);
record!(AccountUserRecord => AccountUser, [account: Account, user: User]);
record!(LibraryRecord => Library, [account: Account]);
record!(ProgramRecord => Program, [user: User, library: Library]);
record!(ProgramMemeRecord => ProgramMeme, [program: Program]);
record!(ProgramVoiceRecord => ProgramVoice, [program: Program]);
record!(ProgramVoiceTrackRecord => ProgramVoiceTrack, [voice: ProgramVoice]);
record!(ProgramSequenceRecord => ProgramSequence, [program: Program]);
record!(ProgramSequenceBindingRecord => ProgramSequenceBinding, [sequence: ProgramSequence]);
record!(ProgramSequenceBindingMemeRecord => ProgramSequenceBindingMeme, [binding: ProgramSequenceBinding]);
record!(ProgramSequenceChordRecord => ProgramSequenceChord, [sequence: ProgramSequence]);
record!(ProgramSequencePatternRecord => ProgramSequencePattern, [sequence: ProgramSequence, voice: ProgramVoice]);
record!(ProgramSequencePatternEventRecord => ProgramSequencePatternEvent, [pattern: ProgramSequencePattern, track: ProgramVoiceTrack]);
record!(InstrumentRecord => Instrument, [user: User, library: Library]);
record!(InstrumentMemeRecord => InstrumentMeme, [instrument: Instrument]);
record!(InstrumentAudioRecord => InstrumentAudio, [instrument: Instrument]);
record!(InstrumentAudioEventRecord => InstrumentAudioEvent, [audio: InstrumentAudio]);
record!(InstrumentAudioChordRecord => InstrumentAudioChord, [audio: InstrumentAudio]);

/// Check one section's parent refs against everything declared before it
fn check_section<'a, R: Record>(
    declared: &mut HashSet<(&'static str, &'a str)>,
    records: &'a [R],
) -> Result<()> {
    for record in records {
        for (kind, name) in record.parents() {
            if !declared.contains(&(kind, name)) {
                return Err(Error::InvalidInput(format!(
                    "{} refers to missing {} ref '{}'",
                    R::KIND,
                    kind,
                    name
                )));
            }
        }

        if let Some(name) = record.reference() {
            if !declared.insert((R::KIND, name)) {
                return Err(Error::InvalidInput(format!("Duplicate {} ref '{}'", R::KIND, name)));
            }
        }
    }
    Ok(())
}

/// Inserted entities by ref, for one kind
struct Refs<E> {
    by_name: HashMap<String, E>,
}

impl<E: Entity> Refs<E> {
    fn new() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    fn get(&self, name: &str) -> Result<&E> {
        self.by_name
            .get(name)
            .ok_or_else(|| Error::InvalidInput(format!("{} ref '{}' does not exist", E::KIND, name)))
    }

    fn remember(&mut self, name: Option<&str>, entity: E) {
        if let Some(name) = name {
            self.by_name.insert(name.to_string(), entity);
        }
    }
}

/// Replace a factory-assigned id with the one exported alongside the record
fn keep_id(id: &mut Uuid, exported: Option<Uuid>) {
    if let Some(exported) = exported {
        *id = exported;
    }
}

impl SeedDocument {
    /// Read a `.json` or `.toml` seed document
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(Error::InvalidInput(format!(
                "{}: seed documents must end in .json or .toml",
                path.display()
            ))),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Number of records across every section
    pub fn len(&self) -> usize {
        self.users.len()
            + self.user_roles.len()
            + self.accounts.len()
            + self.account_users.len()
            + self.libraries.len()
            + self.programs.len()
            + self.program_memes.len()
            + self.program_voices.len()
            + self.program_voice_tracks.len()
            + self.program_sequences.len()
            + self.program_sequence_bindings.len()
            + self.program_sequence_binding_memes.len()
            + self.program_sequence_chords.len()
            + self.program_sequence_patterns.len()
            + self.program_sequence_pattern_events.len()
            + self.instruments.len()
            + self.instrument_memes.len()
            + self.instrument_audios.len()
            + self.instrument_audio_events.len()
            + self.instrument_audio_chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify every parent ref names a declared record and no ref repeats
    ///
    /// Sections are checked in construction order, so a parent must be of a
    /// kind that is inserted before its child.
    pub fn check_refs(&self) -> Result<()> {
        let mut declared = HashSet::new();
        check_section(&mut declared, &self.users)?;
        check_section(&mut declared, &self.user_roles)?;
        check_section(&mut declared, &self.accounts)?;
        check_section(&mut declared, &self.account_users)?;
        check_section(&mut declared, &self.libraries)?;
        check_section(&mut declared, &self.programs)?;
        check_section(&mut declared, &self.program_memes)?;
        check_section(&mut declared, &self.program_voices)?;
        check_section(&mut declared, &self.program_voice_tracks)?;
        check_section(&mut declared, &self.program_sequences)?;
        check_section(&mut declared, &self.program_sequence_bindings)?;
        check_section(&mut declared, &self.program_sequence_binding_memes)?;
        check_section(&mut declared, &self.program_sequence_chords)?;
        check_section(&mut declared, &self.program_sequence_patterns)?;
        check_section(&mut declared, &self.program_sequence_pattern_events)?;
        check_section(&mut declared, &self.instruments)?;
        check_section(&mut declared, &self.instrument_memes)?;
        check_section(&mut declared, &self.instrument_audios)?;
        check_section(&mut declared, &self.instrument_audio_events)?;
        check_section(&mut declared, &self.instrument_audio_chords)?;
        Ok(())
    }

    /// Insert every record through `seeder`
    ///
    /// Refs are checked before anything is inserted.
    pub async fn load(&self, seeder: &mut Seeder) -> Result<()> {
        self.check_refs()?;
        info!("Loading seed document with {} records", self.len());

        let mut users = Refs::<User>::new();
        for r in &self.users {
            let mut user = User::create(&r.name, &r.email, r.avatar_url.as_deref());
            keep_id(&mut user.id, r.id);
            let user = seeder.insert(user).await?;
            users.remember(r.reference.as_deref(), user);
        }

        for r in &self.user_roles {
            let mut role = UserRole::create(users.get(&r.user)?, r.role_type.parse()?);
            keep_id(&mut role.id, r.id);
            seeder.insert(role).await?;
        }

        let mut accounts = Refs::<Account>::new();
        for r in &self.accounts {
            let mut account = Account::create(&r.name);
            keep_id(&mut account.id, r.id);
            let account = seeder.insert(account).await?;
            accounts.remember(r.reference.as_deref(), account);
        }

        for r in &self.account_users {
            let mut member = AccountUser::create(accounts.get(&r.account)?, users.get(&r.user)?);
            keep_id(&mut member.id, r.id);
            seeder.insert(member).await?;
        }

        let mut libraries = Refs::<Library>::new();
        for r in &self.libraries {
            let mut library = Library::create(accounts.get(&r.account)?, &r.name);
            keep_id(&mut library.id, r.id);
            let library = seeder.insert(library).await?;
            libraries.remember(r.reference.as_deref(), library);
        }

        let mut programs = Refs::<Program>::new();
        for r in &self.programs {
            let mut program = Program::create(
                users.get(&r.user)?,
                libraries.get(&r.library)?,
                r.program_type.parse()?,
                r.state.parse()?,
                &r.name,
                &r.key,
                r.tempo,
                r.density,
            );
            keep_id(&mut program.id, r.id);
            let program = seeder.insert(program).await?;
            programs.remember(r.reference.as_deref(), program);
        }

        for r in &self.program_memes {
            let mut meme = ProgramMeme::create(programs.get(&r.program)?, &r.name);
            keep_id(&mut meme.id, r.id);
            seeder.insert(meme).await?;
        }

        let mut voices = Refs::<ProgramVoice>::new();
        for r in &self.program_voices {
            let mut voice = ProgramVoice::create(programs.get(&r.program)?, r.voice_type.parse()?, &r.name);
            keep_id(&mut voice.id, r.id);
            let voice = seeder.insert(voice).await?;
            voices.remember(r.reference.as_deref(), voice);
        }

        let mut tracks = Refs::<ProgramVoiceTrack>::new();
        for r in &self.program_voice_tracks {
            let mut track = ProgramVoiceTrack::create(voices.get(&r.voice)?, &r.name);
            keep_id(&mut track.id, r.id);
            let track = seeder.insert(track).await?;
            tracks.remember(r.reference.as_deref(), track);
        }

        let mut sequences = Refs::<ProgramSequence>::new();
        for r in &self.program_sequences {
            let mut sequence = ProgramSequence::create(
                programs.get(&r.program)?,
                r.total,
                &r.name,
                r.density,
                &r.key,
                r.tempo,
            );
            keep_id(&mut sequence.id, r.id);
            let sequence = seeder.insert(sequence).await?;
            sequences.remember(r.reference.as_deref(), sequence);
        }

        let mut bindings = Refs::<ProgramSequenceBinding>::new();
        for r in &self.program_sequence_bindings {
            let mut binding = ProgramSequenceBinding::create(sequences.get(&r.sequence)?, r.offset);
            keep_id(&mut binding.id, r.id);
            let binding = seeder.insert(binding).await?;
            bindings.remember(r.reference.as_deref(), binding);
        }

        for r in &self.program_sequence_binding_memes {
            let mut meme = ProgramSequenceBindingMeme::create(bindings.get(&r.binding)?, &r.name);
            keep_id(&mut meme.id, r.id);
            seeder.insert(meme).await?;
        }

        for r in &self.program_sequence_chords {
            let mut chord = ProgramSequenceChord::create(sequences.get(&r.sequence)?, r.position, &r.name);
            keep_id(&mut chord.id, r.id);
            seeder.insert(chord).await?;
        }

        let mut patterns = Refs::<ProgramSequencePattern>::new();
        for r in &self.program_sequence_patterns {
            let mut pattern = ProgramSequencePattern::create(
                sequences.get(&r.sequence)?,
                voices.get(&r.voice)?,
                r.pattern_type.parse()?,
                r.total,
                &r.name,
            )?;
            keep_id(&mut pattern.id, r.id);
            let pattern = seeder.insert(pattern).await?;
            patterns.remember(r.reference.as_deref(), pattern);
        }

        for r in &self.program_sequence_pattern_events {
            let mut event = ProgramSequencePatternEvent::create(
                patterns.get(&r.pattern)?,
                tracks.get(&r.track)?,
                r.position,
                r.duration,
                &r.note,
                r.velocity,
            )?;
            keep_id(&mut event.id, r.id);
            seeder.insert(event).await?;
        }

        let mut instruments = Refs::<Instrument>::new();
        for r in &self.instruments {
            let mut instrument = Instrument::create(
                users.get(&r.user)?,
                libraries.get(&r.library)?,
                r.instrument_type.parse()?,
                r.state.parse()?,
                &r.name,
            );
            instrument.density = r.density;
            keep_id(&mut instrument.id, r.id);
            let instrument = seeder.insert(instrument).await?;
            instruments.remember(r.reference.as_deref(), instrument);
        }

        for r in &self.instrument_memes {
            let mut meme = InstrumentMeme::create(instruments.get(&r.instrument)?, &r.name);
            keep_id(&mut meme.id, r.id);
            seeder.insert(meme).await?;
        }

        let mut audios = Refs::<InstrumentAudio>::new();
        for r in &self.instrument_audios {
            let mut audio = InstrumentAudio::create(
                instruments.get(&r.instrument)?,
                &r.name,
                &r.waveform_key,
                r.start,
                r.length,
                r.tempo,
                r.pitch,
                r.density,
            );
            keep_id(&mut audio.id, r.id);
            let audio = seeder.insert(audio).await?;
            audios.remember(r.reference.as_deref(), audio);
        }

        for r in &self.instrument_audio_events {
            let mut event = InstrumentAudioEvent::create(
                audios.get(&r.audio)?,
                r.position,
                r.duration,
                &r.name,
                &r.note,
                r.velocity,
            );
            keep_id(&mut event.id, r.id);
            seeder.insert(event).await?;
        }

        for r in &self.instrument_audio_chords {
            let mut chord = InstrumentAudioChord::create(audios.get(&r.audio)?, r.position, &r.name);
            keep_id(&mut chord.id, r.id);
            seeder.insert(chord).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
        [[libraries]]
        ref = "house"
        account = "bananas"
        name = "house"

        [[accounts]]
        ref = "bananas"
        name = "bananas"
    "#;

    #[test]
    fn test_sections_may_appear_in_any_order() {
        let doc = SeedDocument::from_toml_str(LIBRARY).unwrap();

        assert_eq!(doc.len(), 2);
        assert!(doc.check_refs().is_ok());
    }

    #[test]
    fn test_dangling_ref_is_invalid_input() {
        let doc = SeedDocument::from_toml_str(
            r#"
            [[libraries]]
            account = "nowhere"
            name = "house"
            "#,
        )
        .unwrap();

        match doc.check_refs() {
            Err(Error::InvalidInput(msg)) => {
                assert_eq!(msg, "Library refers to missing Account ref 'nowhere'")
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ref_is_invalid_input() {
        let doc = SeedDocument::from_json_str(
            r#"{ "users": [
                { "ref": "john", "name": "john", "email": "john@email.com" },
                { "ref": "john", "name": "johnny", "email": "johnny@email.com" }
            ] }"#,
        )
        .unwrap();

        match doc.check_refs() {
            Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Duplicate User ref 'john'"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_refs_are_namespaced_by_kind() {
        // An account and a library may share a ref
        let doc = SeedDocument::from_toml_str(
            r#"
            [[accounts]]
            ref = "house"
            name = "house"

            [[libraries]]
            ref = "house"
            account = "house"
            name = "house"
            "#,
        )
        .unwrap();

        assert!(doc.check_refs().is_ok());
    }

    #[test]
    fn test_parent_of_wrong_kind_is_dangling() {
        let doc = SeedDocument::from_toml_str(
            r#"
            [[users]]
            ref = "bananas"
            name = "john"
            email = "john@email.com"

            [[libraries]]
            account = "bananas"
            name = "house"
            "#,
        )
        .unwrap();

        assert!(matches!(doc.check_refs(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let result = SeedDocument::from_toml_str("[[chains]]\nname = \"x\"\n");

        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_defaults_fill_optional_numbers() {
        let doc = SeedDocument::from_json_str(
            r#"{ "instrument_audios": [
                { "instrument": "drums", "name": "Kick", "waveform_key": "kick.wav",
                  "tempo": 120.0, "pitch": 57.6 }
            ] }"#,
        )
        .unwrap();

        let audio = &doc.instrument_audios[0];
        assert_eq!(audio.start, 0.0);
        assert_eq!(audio.length, 0.0);
        assert_eq!(audio.density, 0.6);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("seed.yaml");
        std::fs::write(&path, "users: []").unwrap();

        assert!(matches!(SeedDocument::from_path(&path), Err(Error::InvalidInput(_))));
    }
}
