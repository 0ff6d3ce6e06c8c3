//! Producer tasks that feed a [`FrameMailbox`] from a [`FrameSource`].
//!
//! A producer owns its thread: it is started with [`ProducerTask::spawn`] and
//! ends on [`ProducerTask::stop`], when its handle is dropped, at end of stream
//! (unless looping), or when the source fails. The mapping engine never starts
//! producers on its own; it only reads the mailbox.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{FrameError, FrameResult};
use crate::frame::Frame;
use crate::mailbox::FrameMailbox;

/// A pull-based stream of decoded frames.
pub trait FrameSource: Send {
    /// Decodes the next frame. `Ok(None)` signals end of stream.
    fn next_frame(&mut self) -> FrameResult<Option<Frame>>;

    /// Restarts the stream from its first frame.
    fn rewind(&mut self) -> FrameResult<()>;
}

/// Pacing and looping behavior of a producer.
#[derive(Debug, Clone)]
pub struct ProducerOptions {
    /// Delay between published frames.
    pub frame_interval: Duration,
    /// Whether to rewind the source at end of stream.
    pub looping: bool,
}

impl Default for ProducerOptions {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_nanos(1_000_000_000 / 30),
            looping: true,
        }
    }
}

impl ProducerOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the delay between frames.
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Sets whether the source loops.
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }
}

/// Handle to a running producer thread.
pub struct ProducerTask {
    name: String,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl ProducerTask {
    /// Starts a named thread that pulls frames from `source` and publishes them.
    pub fn spawn(
        name: impl Into<String>,
        source: Box<dyn FrameSource>,
        mailbox: Arc<FrameMailbox>,
        options: ProducerOptions,
    ) -> FrameResult<Self> {
        let name = name.into();
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let name = name.clone();
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name(name.clone())
                .spawn(move || run(&name, source, &mailbox, &options, &stop))
                .map_err(FrameError::Spawn)?
        };

        log::info!("started frame producer '{name}'");
        Ok(Self {
            name,
            stop,
            handle: Some(handle),
        })
    }

    /// Name of the producer thread.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the producer thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the producer to stop and waits for it.
    ///
    /// Returns the number of frames it published. Calling this again returns 0.
    pub fn stop(&mut self) -> u64 {
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();

        match handle.join() {
            Ok(published) => {
                log::info!("stopped frame producer '{}' after {published} frames", self.name);
                published
            }
            Err(_) => {
                log::error!("frame producer '{}' panicked", self.name);
                0
            }
        }
    }
}

impl Drop for ProducerTask {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(
    name: &str,
    mut source: Box<dyn FrameSource>,
    mailbox: &FrameMailbox,
    options: &ProducerOptions,
    stop: &AtomicBool,
) -> u64 {
    let mut sequence = 0u64;
    let mut published = 0u64;
    let mut just_rewound = false;

    while !stop.load(Ordering::Acquire) {
        match source.next_frame() {
            Ok(Some(frame)) => {
                mailbox.publish(Arc::new(frame.with_sequence(sequence)));
                sequence += 1;
                published += 1;
                just_rewound = false;
            }
            Ok(None) if options.looping && !just_rewound => {
                log::debug!("producer '{name}' looping after {sequence} frames");
                if let Err(err) = source.rewind() {
                    log::error!("producer '{name}' failed to rewind: {err}");
                    break;
                }
                sequence = 0;
                just_rewound = true;
                continue;
            }
            Ok(None) => {
                if just_rewound {
                    log::warn!("producer '{name}' has no frames after rewind");
                } else {
                    log::info!("producer '{name}' reached end of stream");
                }
                break;
            }
            Err(err) => {
                log::error!("producer '{name}' failed: {err}");
                break;
            }
        }
        thread::park_timeout(options.frame_interval);
    }

    published
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    /// Plays a fixed list of solid frames.
    struct Scripted {
        colors: Vec<u32>,
        cursor: usize,
        rewinds: Arc<Mutex<u32>>,
        fail_at: Option<usize>,
    }

    impl Scripted {
        fn new(colors: Vec<u32>) -> Self {
            Self {
                colors,
                cursor: 0,
                rewinds: Arc::new(Mutex::new(0)),
                fail_at: None,
            }
        }
    }

    impl FrameSource for Scripted {
        fn next_frame(&mut self) -> FrameResult<Option<Frame>> {
            if self.fail_at == Some(self.cursor) {
                return Err(FrameError::EmptySequence);
            }
            let Some(color) = self.colors.get(self.cursor) else {
                return Ok(None);
            };
            self.cursor += 1;
            Frame::from_packed_rgb(1, 1, vec![*color]).map(Some)
        }

        fn rewind(&mut self) -> FrameResult<()> {
            self.cursor = 0;
            *self.rewinds.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn fast() -> ProducerOptions {
        ProducerOptions::new().with_frame_interval(Duration::from_millis(1))
    }

    fn wait_until(mut condition: impl FnMut() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !condition() {
            assert!(Instant::now() < deadline, "timed out");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_publishes_until_end_of_stream() {
        let mailbox = Arc::new(FrameMailbox::new());
        let source = Scripted::new(vec![0x0000_0001, 0x0000_0002, 0x0000_0003]);
        let mut task = ProducerTask::spawn(
            "scripted",
            Box::new(source),
            Arc::clone(&mailbox),
            fast().with_looping(false),
        )
        .unwrap();
        assert_eq!(task.name(), "scripted");

        wait_until(|| !task.is_running());
        let last = mailbox.try_take().unwrap();
        assert_eq!(last.rgb_at(0, 0), Some([0, 0, 3]));
        assert_eq!(last.sequence(), 2);
        assert_eq!(task.stop(), 3);
        assert_eq!(task.stop(), 0);
    }

    #[test]
    fn test_looping_rewinds_and_restarts_sequence() {
        let mailbox = Arc::new(FrameMailbox::new());
        let source = Scripted::new(vec![0x0000_0001, 0x0000_0002]);
        let rewinds = Arc::clone(&source.rewinds);
        let mut task =
            ProducerTask::spawn("looping", Box::new(source), Arc::clone(&mailbox), fast()).unwrap();

        wait_until(|| *rewinds.lock().unwrap() >= 2);
        assert!(task.is_running());
        let published = task.stop();
        assert!(published >= 4);
        assert!(!task.is_running());
        assert!(mailbox.try_take().unwrap().sequence() <= 1);
    }

    #[test]
    fn test_empty_looping_source_ends() {
        let mailbox = Arc::new(FrameMailbox::new());
        let mut task = ProducerTask::spawn(
            "empty",
            Box::new(Scripted::new(Vec::new())),
            Arc::clone(&mailbox),
            fast(),
        )
        .unwrap();
        wait_until(|| !task.is_running());
        assert_eq!(task.stop(), 0);
        assert!(mailbox.try_take().is_none());
    }

    #[test]
    fn test_source_error_ends_task() {
        let mailbox = Arc::new(FrameMailbox::new());
        let mut source = Scripted::new(vec![0x0000_0001, 0x0000_0002, 0x0000_0003]);
        source.fail_at = Some(1);
        let mut task =
            ProducerTask::spawn("failing", Box::new(source), Arc::clone(&mailbox), fast()).unwrap();

        wait_until(|| !task.is_running());
        assert_eq!(task.stop(), 1);
        assert_eq!(mailbox.try_take().unwrap().rgb_at(0, 0), Some([0, 0, 1]));
    }

    #[test]
    fn test_stop_interrupts_long_interval() {
        let mailbox = Arc::new(FrameMailbox::new());
        let source = Scripted::new(vec![0x0000_0001]);
        let options = ProducerOptions::new().with_frame_interval(Duration::from_secs(60));
        let mut task =
            ProducerTask::spawn("slow", Box::new(source), Arc::clone(&mailbox), options).unwrap();

        wait_until(|| mailbox.has_frame());
        let started = Instant::now();
        assert_eq!(task.stop(), 1);
        assert!(started.elapsed() < Duration::from_secs(30));
    }
}
