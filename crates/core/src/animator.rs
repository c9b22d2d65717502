//! Host-controlled render thread.
//!
//! [`Animator::spawn`] moves a [`FrameDriver`] and its surface onto a
//! dedicated thread that ticks at a fixed interval until stopped. Input
//! (resize, pointer, theme) reaches the driver through a channel drained at
//! the start of every frame, so the driver keeps a single owner.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::debug;

use crate::driver::FrameDriver;
use crate::parallax::Pointer;
use crate::surface::Surface;
use crate::theme::Theme;

/// Input forwarded to the render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Resize { width: f64, height: f64 },
    Pointer(Pointer),
    Theme(Theme),
}

pub struct Animator;

impl Animator {
    /// Starts the driver on a new thread, ticking every `frame_interval`.
    ///
    /// The thread exits when [`AnimatorHandle::stop`] is called, when the
    /// handle is dropped, or when the driver stops on its own.
    pub fn spawn<S>(driver: FrameDriver, surface: S, frame_interval: Duration) -> AnimatorHandle<S>
    where
        S: Surface + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let flag = Arc::clone(&stop);
        let thread = thread::spawn(move || run(driver, surface, frame_interval, &flag, &rx));
        AnimatorHandle {
            stop,
            input: tx,
            thread: Some(thread),
        }
    }
}

fn run<S: Surface>(
    mut driver: FrameDriver,
    mut surface: S,
    frame_interval: Duration,
    stop: &AtomicBool,
    input: &Receiver<Input>,
) -> (FrameDriver, S) {
    driver.start();
    while !stop.load(Ordering::Acquire) {
        for event in input.try_iter() {
            match event {
                Input::Resize { width, height } => driver.resize(width, height),
                Input::Pointer(p) => driver.set_pointer(p),
                Input::Theme(t) => driver.apply_theme(t),
            }
        }
        if driver.tick(&mut surface).is_none() {
            break;
        }
        thread::sleep(frame_interval);
    }
    driver.stop();
    debug!("render thread exiting after {} frames", driver.frame());
    (driver, surface)
}

/// Handle to a running render thread.
pub struct AnimatorHandle<S> {
    stop: Arc<AtomicBool>,
    input: Sender<Input>,
    thread: Option<JoinHandle<(FrameDriver, S)>>,
}

impl<S> AnimatorHandle<S> {
    /// Asks the thread to finish after the current frame.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Forwards input to the driver. Returns `false` once the thread is gone.
    pub fn send(&self, input: Input) -> bool {
        self.input.send(input).is_ok()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the thread and returns the driver and surface.
    ///
    /// Returns `None` if the render thread panicked.
    pub fn join(mut self) -> Option<(FrameDriver, S)> {
        self.stop();
        self.thread.take().and_then(|t| t.join().ok())
    }
}

impl<S> Drop for AnimatorHandle<S> {
    fn drop(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
