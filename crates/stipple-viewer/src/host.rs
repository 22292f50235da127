use stipple_engine::command::{Command, CommandRouter, RenderWorker, WorkerConfig};
use stipple_engine::render::{PipelineConfig, PointBackend};
use stipple_engine::{Error, Result};

/// Where commands run: a dedicated render thread or the caller's thread.
pub enum Driver<B: PointBackend> {
    Worker(RenderWorker<B>),
    Inline(CommandRouter<B>),
}

impl<B: PointBackend + Send + 'static> Driver<B> {
    pub fn new(pipeline: PipelineConfig, inline: bool) -> Result<Self> {
        if inline {
            log::info!("running the render pipeline inline");
            Ok(Driver::Inline(CommandRouter::new(pipeline)))
        } else {
            RenderWorker::spawn(pipeline, WorkerConfig::default()).map(Driver::Worker)
        }
    }

    /// Sends one command and returns every error reported since the last call.
    ///
    /// Only a stopped worker is returned as `Err`.
    pub fn send(&mut self, command: Command<B>) -> Result<Vec<Error>> {
        match self {
            Driver::Worker(worker) => {
                worker.send(command)?;
                Ok(worker.drain_errors())
            }
            Driver::Inline(router) => {
                let tag = command.tag();
                Ok(match router.dispatch(command) {
                    Ok(_) => Vec::new(),
                    Err(err) => {
                        log::error!("{tag} failed: {err}");
                        vec![err]
                    }
                })
            }
        }
    }
}

/// First fatal error in `errors`, after logging the recoverable ones.
pub fn first_fatal(errors: Vec<Error>) -> Option<Error> {
    let mut fatal = None;
    for err in errors {
        if err.is_fatal() {
            fatal.get_or_insert(err);
        } else {
            log::warn!("command rejected: {err}");
        }
    }
    fatal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_errors_are_picked_out() {
        let errors = vec![
            Error::NotInitialized,
            Error::Surface("lost".into()),
            Error::Setup("late".into()),
        ];
        assert_eq!(first_fatal(errors), Some(Error::Surface("lost".into())));
        assert_eq!(first_fatal(vec![Error::NotInitialized]), None);
    }
}
