//! # Helper threads
//!
//! The solver overlaps two computations of every iteration with work on the calling thread: the
//! product of a row vector with the nonbasic columns, and the solve that the steepest edge weight
//! update needs. Both run on a persistent helper thread that receives one job at a time.
use std::panic;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, SendError, sync_channel, SyncSender};
use std::thread;
use std::thread::JoinHandle;

pub mod multiply;
pub mod steepest_edge;

/// A long lived thread that processes one job at a time.
///
/// Jobs are sent over a channel with room for a single job, results come back over a second
/// channel. Dropping the helper closes the job channel, which ends the thread, and joins it.
///
/// If the thread can't be started, or has stopped, jobs are processed on the calling thread.
pub(crate) struct Helper<J, R> {
    work: Arc<dyn Fn(J) -> R + Send + Sync>,
    channels: Option<(SyncSender<J>, Receiver<R>)>,
    handle: Option<JoinHandle<()>>,
    /// Result of a job that was processed on the calling thread.
    pending: Option<R>,
}

impl<J: Send + 'static, R: Send + 'static> Helper<J, R> {
    /// Start a thread that applies `work` to every job it receives.
    pub fn spawn(name: &str, work: impl Fn(J) -> R + Send + Sync + 'static) -> Self {
        let work: Arc<dyn Fn(J) -> R + Send + Sync> = Arc::new(work);

        let (job_sender, job_receiver) = sync_channel::<J>(1);
        let (result_sender, result_receiver) = sync_channel::<R>(1);
        let thread_work = Arc::clone(&work);
        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                for job in job_receiver {
                    if result_sender.send(thread_work(job)).is_err() {
                        break;
                    }
                }
            });

        match spawned {
            Ok(handle) => Self {
                work,
                channels: Some((job_sender, result_receiver)),
                handle: Some(handle),
                pending: None,
            },
            Err(error) => {
                log::warn!("could not start helper thread {}, computing inline: {}", name, error);
                Self { work, channels: None, handle: None, pending: None }
            }
        }
    }

    /// Hand a job to the helper.
    ///
    /// Every submitted job should be followed by a call to `wait` before the next one.
    pub fn submit(&mut self, job: J) {
        debug_assert!(self.pending.is_none());

        let job = match &self.channels {
            Some((jobs, _)) => match jobs.send(job) {
                Ok(()) => return,
                Err(SendError(job)) => {
                    self.channels = None;
                    job
                }
            },
            None => job,
        };
        self.pending = Some((self.work)(job));
    }

    /// Block until the result of the last submitted job is available.
    ///
    /// A panic on the helper thread is resumed on the calling thread.
    pub fn wait(&mut self) -> R {
        if let Some(result) = self.pending.take() {
            return result;
        }

        let received = self.channels.as_ref().map(|(_, results)| results.recv());
        match received {
            Some(Ok(result)) => result,
            _ => {
                self.channels = None;
                if let Some(Err(payload)) = self.handle.take().map(JoinHandle::join) {
                    panic::resume_unwind(payload);
                }
                unreachable!("a job was submitted without a helper to process it");
            }
        }
    }
}

impl<J, R> Drop for Helper<J, R> {
    fn drop(&mut self) {
        // Closing the job channel ends the loop on the helper thread
        self.channels = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("helper thread panicked");
            }
        }
    }
}
