//! Built-in content set
//!
//! A small but complete library: three users and an account, one program of
//! each type, and one percussive and one harmonic instrument. Each stage
//! returns the entities later stages hang their children on.

use crate::seeder::Seeder;
use tracing::info;
use xjh_common::model::*;
use xjh_common::Result;

/// Stage 1
pub struct People {
    pub john: User,
    pub jenny: User,
    pub bill: User,
}

/// Stage 2
pub struct House {
    pub account: Account,
    pub library: Library,
}

/// Stage 5
pub struct RhythmProgram {
    pub program: Program,
    pub drums: ProgramVoice,
    pub clock: ProgramVoiceTrack,
    pub snort: ProgramVoiceTrack,
    pub kick: ProgramVoiceTrack,
    pub snarl: ProgramVoiceTrack,
    pub clack: ProgramVoiceTrack,
    pub snarn: ProgramVoiceTrack,
    pub click: ProgramVoiceTrack,
    pub snap: ProgramVoiceTrack,
}

/// Run every stage in order
pub async fn go(seeder: &mut Seeder) -> Result<()> {
    info!("Stage 1: users and roles");
    let people = users(seeder).await?;

    info!("Stage 2: account and library");
    let house = account(seeder, &people).await?;

    info!("Stage 3: macro program");
    macro_program(seeder, &people, &house).await?;

    info!("Stage 4: main program");
    main_program(seeder, &people, &house).await?;

    info!("Stage 5: rhythm program voices");
    let rhythm = rhythm_voices(seeder, &people, &house).await?;

    info!("Stage 6: rhythm program patterns");
    rhythm_patterns(seeder, &rhythm).await?;

    info!("Stage 7: detail program");
    detail_program(seeder, &people, &house).await?;

    info!("Stage 8: percussive instrument");
    percussive_instrument(seeder, &people, &house).await?;

    info!("Stage 9: harmonic instrument");
    harmonic_instrument(seeder, &people, &house).await?;

    Ok(())
}

async fn users(seeder: &mut Seeder) -> Result<People> {
    let john = seeder
        .insert(User::create("john", "john@email.com", Some("http://pictures.com/john.gif")))
        .await?;
    seeder.insert(UserRole::create(&john, UserRoleType::Admin)).await?;

    let jenny = seeder
        .insert(User::create("jenny", "jenny@email.com", Some("http://pictures.com/jenny.gif")))
        .await?;
    seeder.insert(UserRole::create(&jenny, UserRoleType::User)).await?;
    seeder.insert(UserRole::create(&jenny, UserRoleType::Artist)).await?;

    let bill = seeder.insert(User::create("bill", "bill@email.com", None)).await?;
    seeder.insert(UserRole::create(&bill, UserRoleType::Engineer)).await?;

    Ok(People { john, jenny, bill })
}

async fn account(seeder: &mut Seeder, people: &People) -> Result<House> {
    let account = seeder.insert(Account::create("bananas")).await?;
    seeder.insert(AccountUser::create(&account, &people.jenny)).await?;
    seeder.insert(AccountUser::create(&account, &people.bill)).await?;
    let library = seeder.insert(Library::create(&account, "house")).await?;

    Ok(House { account, library })
}

async fn macro_program(seeder: &mut Seeder, people: &People, house: &House) -> Result<Program> {
    let program = seeder
        .insert(Program::create(
            &people.jenny,
            &house.library,
            ProgramType::Macro,
            ProgramState::Published,
            "Tropical, Wild to Cozy",
            "C",
            120.0,
            0.6,
        ))
        .await?;
    seeder.insert(ProgramMeme::create(&program, "Tropical")).await?;

    let wild = seeder
        .insert(ProgramSequence::create(&program, 64, "Start Wild", 0.6, "C", 125.0))
        .await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&wild, 0)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Wild")).await?;

    let intermediate = seeder
        .insert(ProgramSequence::create(&program, 64, "Intermediate", 0.4, "Bb minor", 115.0))
        .await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&intermediate, 1)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Cozy")).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Wild")).await?;

    let cozy = seeder
        .insert(ProgramSequence::create(&program, 64, "Finish Cozy", 0.4, "Ab minor", 125.0))
        .await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&cozy, 2)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Cozy")).await?;

    Ok(program)
}

async fn main_program(seeder: &mut Seeder, people: &People, house: &House) -> Result<Program> {
    let program = seeder
        .insert(Program::create(
            &people.jenny,
            &house.library,
            ProgramType::Main,
            ProgramState::Published,
            "Main Jam",
            "C minor",
            140.0,
            0.6,
        ))
        .await?;
    seeder.insert(ProgramMeme::create(&program, "Outlook")).await?;

    let intro = seeder
        .insert(ProgramSequence::create(&program, 16, "Intro", 0.5, "G major", 135.0))
        .await?;
    seeder.insert(ProgramSequenceChord::create(&intro, 0.0, "G major")).await?;
    seeder.insert(ProgramSequenceChord::create(&intro, 8.0, "Ab minor")).await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&intro, 0)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Optimism")).await?;

    let drop_sequence = seeder
        .insert(ProgramSequence::create(&program, 32, "Drop", 0.5, "G minor", 135.0))
        .await?;
    seeder.insert(ProgramSequenceChord::create(&drop_sequence, 0.0, "C major")).await?;
    seeder.insert(ProgramSequenceChord::create(&drop_sequence, 8.0, "Bb minor")).await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&drop_sequence, 1)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Pessimism")).await?;

    Ok(program)
}

async fn rhythm_voices(seeder: &mut Seeder, people: &People, house: &House) -> Result<RhythmProgram> {
    let program = seeder
        .insert(Program::create(
            &people.jenny,
            &house.library,
            ProgramType::Rhythm,
            ProgramState::Published,
            "Basic Beat",
            "C",
            121.0,
            0.6,
        ))
        .await?;
    seeder.insert(ProgramMeme::create(&program, "Basic")).await?;

    let drums = seeder
        .insert(ProgramVoice::create(&program, InstrumentType::Percussive, "Drums"))
        .await?;
    let clock = seeder.insert(ProgramVoiceTrack::create(&drums, "CLOCK")).await?;
    let snort = seeder.insert(ProgramVoiceTrack::create(&drums, "SNORT")).await?;
    let kick = seeder.insert(ProgramVoiceTrack::create(&drums, "KICK")).await?;
    let snarl = seeder.insert(ProgramVoiceTrack::create(&drums, "SNARL")).await?;
    let clack = seeder.insert(ProgramVoiceTrack::create(&drums, "CLACK")).await?;
    let snarn = seeder.insert(ProgramVoiceTrack::create(&drums, "SNARN")).await?;
    let click = seeder.insert(ProgramVoiceTrack::create(&drums, "CLICK")).await?;
    let snap = seeder.insert(ProgramVoiceTrack::create(&drums, "SNAP")).await?;

    Ok(RhythmProgram {
        program,
        drums,
        clock,
        snort,
        kick,
        snarl,
        clack,
        snarn,
        click,
        snap,
    })
}

async fn rhythm_patterns(seeder: &mut Seeder, rhythm: &RhythmProgram) -> Result<()> {
    let base = seeder
        .insert(ProgramSequence::create(&rhythm.program, 16, "Base", 0.5, "C", 110.3))
        .await?;
    let binding = seeder.insert(ProgramSequenceBinding::create(&base, 0)).await?;
    seeder.insert(ProgramSequenceBindingMeme::create(&binding, "Basic")).await?;

    let drop_pattern = seeder
        .insert(ProgramSequencePattern::create(
            &base,
            &rhythm.drums,
            ProgramSequencePatternType::Loop,
            4,
            "Drop",
        )?)
        .await?;
    for (track, position, note, velocity) in [
        (&rhythm.clock, 0.0, "C2", 1.0),
        (&rhythm.snort, 1.0, "G5", 0.8),
        (&rhythm.kick, 2.5, "C2", 0.6),
        (&rhythm.snarl, 3.0, "G5", 0.9),
    ] {
        seeder
            .insert(ProgramSequencePatternEvent::create(&drop_pattern, track, position, 1.0, note, velocity)?)
            .await?;
    }

    let drop_alt = seeder
        .insert(ProgramSequencePattern::create(
            &base,
            &rhythm.drums,
            ProgramSequencePatternType::Loop,
            4,
            "Drop Alt",
        )?)
        .await?;
    for (track, position, note, velocity) in [
        (&rhythm.clack, 0.0, "B5", 0.9),
        (&rhythm.snarn, 1.0, "D2", 1.0),
        (&rhythm.click, 2.5, "E4", 0.7),
        (&rhythm.snap, 3.0, "C3", 0.5),
    ] {
        seeder
            .insert(ProgramSequencePatternEvent::create(&drop_alt, track, position, 1.0, note, velocity)?)
            .await?;
    }

    Ok(())
}

async fn detail_program(seeder: &mut Seeder, people: &People, house: &House) -> Result<Program> {
    let program = seeder
        .insert(Program::create(
            &people.bill,
            &house.library,
            ProgramType::Detail,
            ProgramState::Published,
            "Detail Jam",
            "Cb minor",
            170.0,
            0.6,
        ))
        .await?;

    let bass = seeder
        .insert(ProgramVoice::create(&program, InstrumentType::Harmonic, "Bass"))
        .await?;
    let bum = seeder.insert(ProgramVoiceTrack::create(&bass, "BUM")).await?;
    let bassline = seeder
        .insert(ProgramSequence::create(&program, 16, "Bassline", 0.5, "Cb minor", 170.0))
        .await?;
    let walk = seeder
        .insert(ProgramSequencePattern::create(
            &bassline,
            &bass,
            ProgramSequencePatternType::Loop,
            4,
            "Walk",
        )?)
        .await?;
    for (position, note) in [(0.0, "C2"), (1.0, "G2"), (2.0, "A#2"), (3.0, "F2")] {
        seeder
            .insert(ProgramSequencePatternEvent::create(&walk, &bum, position, 1.0, note, 0.8)?)
            .await?;
    }

    Ok(program)
}

async fn percussive_instrument(seeder: &mut Seeder, people: &People, house: &House) -> Result<Instrument> {
    let instrument = seeder
        .insert(Instrument::create(
            &people.jenny,
            &house.library,
            InstrumentType::Percussive,
            InstrumentState::Published,
            "808 Drums",
        ))
        .await?;
    seeder.insert(InstrumentMeme::create(&instrument, "Ants")).await?;
    seeder.insert(InstrumentMeme::create(&instrument, "Mold")).await?;

    let kick = seeder
        .insert(InstrumentAudio::create(
            &instrument,
            "Kick",
            "19801735098q47895897895782138975898-kick.wav",
            0.01,
            0.5,
            120.0,
            57.6,
            0.6,
        ))
        .await?;
    seeder
        .insert(InstrumentAudioEvent::create(&kick, 0.0, 1.0, "KICK", "Eb", 1.0))
        .await?;

    let beat = seeder
        .insert(InstrumentAudio::create(
            &instrument,
            "Beat",
            "19801735098q47895897895782138975898.wav",
            0.01,
            2.123,
            120.0,
            440.0,
            0.62,
        ))
        .await?;
    for (position, name, note, velocity) in [
        (0.0, "KICK", "Eb", 1.0),
        (1.0, "SNARE", "Ab", 0.8),
        (2.5, "KICK", "C", 1.0),
        (3.0, "SNARE", "B", 0.8),
    ] {
        seeder
            .insert(InstrumentAudioEvent::create(&beat, position, 1.0, name, note, velocity))
            .await?;
    }

    Ok(instrument)
}

async fn harmonic_instrument(seeder: &mut Seeder, people: &People, house: &House) -> Result<Instrument> {
    let instrument = seeder
        .insert(Instrument::create(
            &people.john,
            &house.library,
            InstrumentType::Harmonic,
            InstrumentState::Published,
            "Pad Chords",
        ))
        .await?;
    seeder.insert(InstrumentMeme::create(&instrument, "Peel")).await?;

    let audio = seeder
        .insert(InstrumentAudio::create(
            &instrument,
            "Chords Cm to D",
            "a0b9f74kf9b4h8d9e0g73k107s09f7-g0e73982.wav",
            0.01,
            2.123,
            120.0,
            440.0,
            0.62,
        ))
        .await?;
    for (position, name) in [
        (0.0, "E minor"),
        (4.0, "A major"),
        (8.0, "B minor"),
        (12.0, "F# major"),
        (16.0, "Ab7"),
        (20.0, "Bb7"),
    ] {
        seeder.insert(InstrumentAudioChord::create(&audio, position, name)).await?;
    }

    Ok(instrument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xjh_common::db::init::init_memory_database;

    #[tokio::test]
    async fn test_every_stage_seeds_its_share() {
        let pool = init_memory_database().await.unwrap();
        let mut seeder = Seeder::begin(&pool).await.unwrap();

        go(&mut seeder).await.unwrap();
        let report = seeder.rollback().await.unwrap();

        assert_eq!(report.count(User::KIND), 3);
        assert_eq!(report.count(UserRole::KIND), 4);
        assert_eq!(report.count(Program::KIND), 4);
        assert_eq!(report.count(ProgramSequence::KIND), 7);
        assert_eq!(report.count(ProgramSequenceBinding::KIND), 6);
        assert_eq!(report.count(ProgramVoiceTrack::KIND), 9);
        assert_eq!(report.count(ProgramSequencePatternEvent::KIND), 12);
        assert_eq!(report.count(InstrumentAudioEvent::KIND), 5);
        assert_eq!(report.count(InstrumentAudioChord::KIND), 6);
        assert_eq!(report.total(), 87);
    }
}
