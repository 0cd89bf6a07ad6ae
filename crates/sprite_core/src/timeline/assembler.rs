//! The append-only timeline buffer and its cursor.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::models::{PcmFormat, SpriteEntry};

use super::silence;

/// Result of appending one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appended {
    /// Sprite entry for the clip (offset = cursor when the append began).
    pub entry: SpriteEntry,
    /// Clip duration in seconds.
    pub duration_secs: f64,
    /// Silence written after the clip, in seconds.
    pub padding_secs: f64,
}

/// Raw `s16le` timeline file with a byte-exact cursor.
///
/// The timeline is the only writer of its file. The cursor counts every byte
/// written, so the cursor in seconds is always the exact duration of the
/// buffer on disk.
pub struct Timeline {
    path: PathBuf,
    writer: BufWriter<File>,
    pcm: PcmFormat,
    cursor_bytes: u64,
}

impl Timeline {
    /// Create (or truncate) the timeline file at `path`.
    pub fn create(path: impl Into<PathBuf>, pcm: PcmFormat) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            pcm,
            cursor_bytes: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pcm(&self) -> PcmFormat {
        self.pcm
    }

    /// Bytes written so far.
    pub fn cursor_bytes(&self) -> u64 {
        self.cursor_bytes
    }

    /// Elapsed seconds since the start of the timeline.
    pub fn cursor_secs(&self) -> f64 {
        self.pcm.duration_secs(self.cursor_bytes)
    }

    /// Append a decoded clip followed by its inter-clip padding.
    ///
    /// The entry's offset is the cursor before the clip; afterwards the
    /// cursor sits one second past the next whole-second boundary.
    pub fn append_clip(&mut self, raw_path: &Path) -> io::Result<Appended> {
        let start_secs = self.cursor_secs();

        let mut reader = BufReader::new(File::open(raw_path)?);
        let clip_bytes = io::copy(&mut reader, &mut self.writer)?;
        self.cursor_bytes += clip_bytes;

        let duration_secs = self.pcm.duration_secs(clip_bytes);
        let entry = SpriteEntry::from_secs(start_secs, duration_secs);

        let padding = silence::padding_bytes(self.cursor_bytes, self.pcm);
        silence::write_zeros(padding, &mut self.writer)?;
        self.cursor_bytes += padding;

        Ok(Appended {
            entry,
            duration_secs,
            padding_secs: self.pcm.duration_secs(padding),
        })
    }

    /// Write the synthetic looping silence track at the cursor.
    ///
    /// Registers `secs` seconds but writes `secs + 1` so the first clip is
    /// separated from the loop point like any other clip.
    pub fn append_silence_track(&mut self, secs: f64) -> io::Result<SpriteEntry> {
        let entry = SpriteEntry::from_secs(self.cursor_secs(), secs).looping();
        self.pad(secs + 1.0)?;
        Ok(entry)
    }

    /// Append `secs` seconds of silence, returning the bytes written.
    pub fn pad(&mut self, secs: f64) -> io::Result<u64> {
        let written = silence::pad(secs, self.pcm, &mut self.writer)?;
        self.cursor_bytes += written;
        Ok(written)
    }

    /// Flush buffered audio so the file can be read by the exporter.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_clip(dir: &Path, name: &str, pcm: PcmFormat, secs: f64) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, vec![0x22u8; pcm.bytes_for_secs(secs) as usize]).unwrap();
        path
    }

    #[test]
    fn two_clip_offsets_follow_padding_rule() {
        let dir = tempdir().unwrap();
        let pcm = PcmFormat::default();
        let beep = write_clip(dir.path(), "beep.raw", pcm, 1.751);
        let boop = write_clip(dir.path(), "boop.raw", pcm, 1.27);

        let mut timeline = Timeline::create(dir.path().join("t.raw"), pcm).unwrap();
        let first = timeline.append_clip(&beep).unwrap();
        let second = timeline.append_clip(&boop).unwrap();

        assert_eq!(first.entry, SpriteEntry::new(0, 1751));
        assert_eq!(second.entry, SpriteEntry::new(3000, 1270));
        assert!((timeline.cursor_secs() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn cursor_advance_stays_in_padding_window() {
        let dir = tempdir().unwrap();
        let pcm = PcmFormat::new(22050, 2);
        let mut timeline = Timeline::create(dir.path().join("t.raw"), pcm).unwrap();

        for (i, secs) in [0.3, 2.0, 0.999, 4.5].iter().enumerate() {
            let clip = write_clip(dir.path(), &format!("{}.raw", i), pcm, *secs);
            let before = timeline.cursor_secs();
            let appended = timeline.append_clip(&clip).unwrap();
            let after_clip = before + appended.duration_secs;
            let after = timeline.cursor_secs();

            assert!(after >= after_clip.ceil() + 1.0 - 1e-9);
            assert!(after < after_clip.ceil() + 2.0);
            assert!(appended.padding_secs >= 1.0 - 1e-9 && appended.padding_secs < 2.0);
        }
    }

    #[test]
    fn buffer_length_equals_cursor() {
        let dir = tempdir().unwrap();
        let pcm = PcmFormat::default();
        let path = dir.path().join("t.raw");
        let clip = write_clip(dir.path(), "a.raw", pcm, 0.5);

        let mut timeline = Timeline::create(&path, pcm).unwrap();
        timeline.append_silence_track(2.0).unwrap();
        let appended = timeline.append_clip(&clip).unwrap();
        timeline.flush().unwrap();

        let on_disk = fs::metadata(&path).unwrap().len();
        assert_eq!(on_disk, timeline.cursor_bytes());

        let clip_and_padding = pcm.bytes_for_secs(appended.duration_secs)
            + pcm.bytes_for_secs(appended.padding_secs)
            + pcm.bytes_for_secs(3.0);
        assert_eq!(on_disk, clip_and_padding);
    }

    #[test]
    fn silence_track_is_looping_at_zero() {
        let dir = tempdir().unwrap();
        let pcm = PcmFormat::default();
        let mut timeline = Timeline::create(dir.path().join("t.raw"), pcm).unwrap();

        let entry = timeline.append_silence_track(5.0).unwrap();
        assert_eq!(entry, SpriteEntry::new(0, 5000).looping());
        assert!((timeline.cursor_secs() - 6.0).abs() < 1e-9);

        let clip = write_clip(dir.path(), "a.raw", pcm, 1.0);
        let appended = timeline.append_clip(&clip).unwrap();
        assert_eq!(appended.entry.offset_ms, 6000);
    }

    #[test]
    fn clip_bytes_are_copied_verbatim() {
        let dir = tempdir().unwrap();
        let pcm = PcmFormat::new(10, 1);
        let clip = dir.path().join("c.raw");
        fs::write(&clip, [1u8, 2, 3, 4]).unwrap();

        let path = dir.path().join("t.raw");
        let mut timeline = Timeline::create(&path, pcm).unwrap();
        timeline.append_clip(&clip).unwrap();
        timeline.flush().unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(&data[..4], &[1, 2, 3, 4]);
        assert!(data[4..].iter().all(|b| *b == 0));
        // 4 bytes = 0.2s, padded to 2.0s = 40 bytes.
        assert_eq!(data.len(), 40);
    }
}
