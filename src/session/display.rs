//! Display collaborator seam and a headless scripted implementation

use crate::io::error::{Result, file_system_error};
use crate::io::image::save_rgb;
use crate::session::events::{InputEvent, parse_script_line};
use image::RgbImage;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;

/// Shows frames and delivers operator input
pub trait Screen {
    /// Present a frame
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be presented
    fn show(&mut self, frame: &RgbImage) -> Result<()>;

    /// Block until the next input event; `None` once input is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails
    fn next_event(&mut self) -> Result<Option<InputEvent>>;
}

/// Screen fed by an event script, writing each frame to a preview image
pub struct ScriptedScreen<R> {
    reader: R,
    pending: VecDeque<InputEvent>,
    preview_path: Option<PathBuf>,
    frames_shown: usize,
}

impl<R: BufRead> ScriptedScreen<R> {
    /// Read events from `reader`; frames go to `preview_path` when given
    pub const fn new(reader: R, preview_path: Option<PathBuf>) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            preview_path,
            frames_shown: 0,
        }
    }

    /// Number of frames presented so far
    pub const fn frames_shown(&self) -> usize {
        self.frames_shown
    }
}

impl<R: BufRead> Screen for ScriptedScreen<R> {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        if let Some(ref path) = self.preview_path {
            save_rgb(frame, path)?;
        }
        self.frames_shown += 1;
        log::debug!(
            "Frame {} ({}x{})",
            self.frames_shown,
            frame.width(),
            frame.height()
        );
        Ok(())
    }

    fn next_event(&mut self) -> Result<Option<InputEvent>> {
        let mut line = String::new();
        while self.pending.is_empty() {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(file_system_error("<event script>", "read event"))?;
            if read == 0 {
                return Ok(None);
            }
            self.pending.extend(parse_script_line(&line));
        }
        Ok(self.pending.pop_front())
    }
}
