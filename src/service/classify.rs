use crate::models::backup_file::{BackupFile, BackupKind};
use crate::models::error::{Result, SelectError};
use chrono::{NaiveDateTime, Timelike};

// Duplicity naming scheme, timestamps look like 20130126T070058Z:
//   duplicity-full.<T>.manifest.gpg
//   duplicity-full.<T>.vol<N>.difftar.gpg
//   duplicity-full-signatures.<T>.sigtar.gpg
//   duplicity-inc.<T1>.to.<T2>.manifest.gpg
//   duplicity-inc.<T1>.to.<T2>.vol<N>.difftar.gpg
//   duplicity-new-signatures.<T1>.to.<T2>.sigtar.gpg
const FULL_PREFIX: &str = "duplicity-full.";
const FULL_SIGNATURES_PREFIX: &str = "duplicity-full-signatures.";
const INC_PREFIX: &str = "duplicity-inc.";
const INC_SIGNATURES_PREFIX: &str = "duplicity-new-signatures.";
const RANGE_SEPARATOR: &str = ".to.";
const MANIFEST_SUFFIX: &str = ".manifest.gpg";
const VOLUME_PREFIX: &str = ".vol";
const VOLUME_SUFFIX: &str = ".difftar.gpg";
const SIGNATURES_SUFFIX: &str = ".sigtar.gpg";

const TIMESTAMP_LEN: usize = 16;
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Manifest or volume, the two shapes shared by full and incremental archives
enum ArchivePart {
    Manifest,
    Volume(u64),
}

/// Classifies a single directory entry. The whole name has to match one
/// pattern, anything left over makes it an unknown file.
pub fn classify(name: &str) -> Result<BackupFile> {
    if let Some(rest) = name.strip_prefix(FULL_SIGNATURES_PREFIX) {
        let (timestamp, tail) = take_timestamp(name, rest)?;
        expect_end(name, tail, SIGNATURES_SUFFIX)?;
        return Ok(BackupFile::full(name, timestamp, BackupKind::FullSignature));
    }

    if let Some(rest) = name.strip_prefix(FULL_PREFIX) {
        let (timestamp, tail) = take_timestamp(name, rest)?;
        let kind = match archive_part(name, tail)? {
            ArchivePart::Manifest => BackupKind::FullManifest,
            ArchivePart::Volume(nr) => BackupKind::FullVolume(nr),
        };
        return Ok(BackupFile::full(name, timestamp, kind));
    }

    if let Some(rest) = name.strip_prefix(INC_SIGNATURES_PREFIX) {
        let (start, end, tail) = take_range(name, rest)?;
        expect_end(name, tail, SIGNATURES_SUFFIX)?;
        return Ok(BackupFile::incremental(
            name,
            start,
            end,
            BackupKind::IncrementalSignature,
        ));
    }

    if let Some(rest) = name.strip_prefix(INC_PREFIX) {
        let (start, end, tail) = take_range(name, rest)?;
        let kind = match archive_part(name, tail)? {
            ArchivePart::Manifest => BackupKind::IncrementalManifest,
            ArchivePart::Volume(nr) => BackupKind::IncrementalVolume(nr),
        };
        return Ok(BackupFile::incremental(name, start, end, kind));
    }

    Err(SelectError::unknown_file(name, "not a duplicity file name"))
}

/// Parses a `YYYYMMDDTHHMMSSZ` timestamp into UTC epoch seconds
pub fn parse_timestamp(name: &str, token: &str) -> Result<i64> {
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == TIMESTAMP_LEN
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8] == b'T'
        && bytes[9..15].iter().all(u8::is_ascii_digit)
        && bytes[15] == b'Z';
    if !well_formed {
        return Err(SelectError::unknown_file(
            name,
            format!("malformed timestamp '{}'", token),
        ));
    }

    let time = NaiveDateTime::parse_from_str(token, TIMESTAMP_FORMAT).map_err(|e| {
        SelectError::unknown_file(name, format!("invalid timestamp '{}': {}", token, e))
    })?;
    // chrono reads second 60 as a leap second folded onto :59
    if time.nanosecond() >= 1_000_000_000 {
        return Err(SelectError::unknown_file(
            name,
            format!("invalid timestamp '{}': second out of range", token),
        ));
    }
    Ok(time.and_utc().timestamp())
}

fn take_timestamp<'a>(name: &str, rest: &'a str) -> Result<(i64, &'a str)> {
    match (rest.get(..TIMESTAMP_LEN), rest.get(TIMESTAMP_LEN..)) {
        (Some(token), Some(tail)) => Ok((parse_timestamp(name, token)?, tail)),
        _ => Err(SelectError::unknown_file(name, "truncated timestamp")),
    }
}

fn take_range<'a>(name: &str, rest: &'a str) -> Result<(i64, i64, &'a str)> {
    let (start, rest) = take_timestamp(name, rest)?;
    let rest = rest.strip_prefix(RANGE_SEPARATOR).ok_or_else(|| {
        SelectError::unknown_file(
            name,
            format!("expected '{}' between timestamps", RANGE_SEPARATOR),
        )
    })?;
    let (end, tail) = take_timestamp(name, rest)?;
    Ok((start, end, tail))
}

fn archive_part(name: &str, tail: &str) -> Result<ArchivePart> {
    if tail == MANIFEST_SUFFIX {
        return Ok(ArchivePart::Manifest);
    }

    let volume = tail
        .strip_prefix(VOLUME_PREFIX)
        .and_then(|rest| rest.strip_suffix(VOLUME_SUFFIX))
        .ok_or_else(|| {
            SelectError::unknown_file(name, format!("unexpected ending '{}'", tail))
        })?;

    if volume.is_empty() || !volume.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectError::unknown_file(
            name,
            format!("invalid volume number '{}'", volume),
        ));
    }
    volume.parse().map(ArchivePart::Volume).map_err(|e| {
        SelectError::unknown_file(
            name,
            format!("invalid volume number '{}': {}", volume, e),
        )
    })
}

fn expect_end(name: &str, tail: &str, suffix: &str) -> Result<()> {
    if tail == suffix {
        Ok(())
    } else {
        Err(SelectError::unknown_file(
            name,
            format!("unexpected ending '{}'", tail),
        ))
    }
}
