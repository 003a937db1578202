use std::{ops::Range, sync::mpsc::Receiver, thread::JoinHandle};

use crate::{error::RtgenResult, rainbow_table::SimpleTable};

/// An event to track the progress of the generation of a rainbow table.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Overall progress of the rainbow table generation in percent.
    Progress(f64),
    /// The nth batch of chains has been computed.
    Batch {
        batch_number: usize,
        batch_count: usize,
        chains: Range<usize>,
    },
}

pub struct SimpleTableHandle {
    pub(crate) handle: JoinHandle<RtgenResult<SimpleTable>>,
    pub(crate) receiver: Receiver<Event>,
}

impl SimpleTableHandle {
    /// Returns the generated rainbow table.
    /// Blocks until the table is finished.
    pub fn join(self) -> RtgenResult<SimpleTable> {
        self.handle
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }

    /// Blocks until an event is received.
    /// Returns `None` if the rainbow table is finished.
    pub fn recv(&self) -> Option<Event> {
        self.receiver.recv().ok()
    }
}
