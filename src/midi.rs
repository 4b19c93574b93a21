// MIDI output for compositions.
//
// Writes a Standard MIDI File, format 1: a conductor track carrying the
// track name and tempo, then one track per composition track on the MIDI
// channel of the same index. Note times and durations are in beats.
//
// Compositions may start notes at negative times. The encoder shifts the
// whole piece so the earliest note lands on tick 0; the Composition itself
// is left untouched.

use crate::composition::Composition;
use crate::error::ComposeError;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use midly::{
    num::{u4, u7, u15, u24, u28},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

/// Ticks per beat (quarter note).
pub const TICKS_PER_BEAT: u16 = 960;

const MAX_DELTA: u64 = (1 << 28) - 1;
const MIDI_MAX: i64 = 127;

/// Encode a composition as SMF bytes.
pub fn encode(composition: &Composition) -> Result<Vec<u8>> {
    let smf = composition_to_smf(composition)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf).context("Failed to serialize MIDI data")?;
    Ok(buf)
}

/// Encode a composition and write it to `path`.
pub fn write_midi(composition: &Composition, path: &Path) -> Result<()> {
    let bytes = encode(composition)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write MIDI file {}", path.display()))?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn check_range(field: &'static str, track: u8, value: i64) -> Result<u7, ComposeError> {
    match (0..=MIDI_MAX).contains(&value) {
        true => Ok(u7::new(value as u8)),
        false => Err(ComposeError::PitchOutOfRange { field, track, value }),
    }
}

fn composition_to_smf(composition: &Composition) -> Result<Smf<'_>> {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));

    // Track 0: conductor
    let tempo_microseconds = 60_000_000 / composition.tempo.max(1);
    smf.tracks.push(vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(composition.track_name.as_bytes())),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]);

    let shift = match composition.time_span() {
        Some((earliest, _)) if earliest < 0 => {
            warn!("Composition starts at beat {earliest}; shifting by {} beats for MIDI", -earliest);
            -earliest
        }
        _ => 0,
    };

    let ticks_per_beat = u64::from(TICKS_PER_BEAT);
    let length_ticks = u64::from(composition.duration) * ticks_per_beat;

    for track_index in 0..composition.track_count {
        if track_index > 15 {
            bail!("Track {track_index} has no MIDI channel (only 16 exist)");
        }
        let channel = u4::new(track_index);

        // (tick, is_note_on, key, velocity); offs sort before ons at equal ticks
        let mut timeline: Vec<(u64, bool, u7, u7)> = Vec::new();
        for event in composition.events.iter().filter(|e| e.track == track_index) {
            let key = check_range("pitch", event.track, event.pitch)?;
            let vel = check_range("velocity", event.track, i64::from(event.velocity))?;
            let start = (event.start_time + shift) as u64 * ticks_per_beat;
            timeline.push((start, true, key, vel));
            timeline.push((start + length_ticks, false, key, u7::new(0)));
        }
        timeline.sort_by_key(|&(tick, is_on, _, _)| (tick, is_on));

        let mut track: Track<'_> = Vec::with_capacity(timeline.len() + 1);
        let mut last_tick = 0u64;
        for (tick, is_on, key, vel) in timeline {
            let delta = tick - last_tick;
            if delta > MAX_DELTA {
                bail!("Gap of {delta} ticks on track {track_index} does not fit in a MIDI delta");
            }
            let message = match is_on {
                true => MidiMessage::NoteOn { key, vel },
                false => MidiMessage::NoteOff { key, vel },
            };
            track.push(TrackEvent {
                delta: u28::new(delta as u32),
                kind: TrackEventKind::Midi { channel, message },
            });
            last_tick = tick;
        }
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });

        smf.tracks.push(track);
    }

    if let Some(stray) = composition.events.iter().find(|e| e.track >= composition.track_count) {
        bail!("Note on track {} but composition declares {} tracks", stray.track, composition.track_count);
    }

    Ok(smf)
}
