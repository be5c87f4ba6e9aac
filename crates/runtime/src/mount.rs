/// Tracks whether a view is still displayed so that late async results can be
/// dropped instead of landing in a view that has gone away.
///
/// Every (re)mount starts a new epoch. Requests capture a [`Ticket`] when they
/// are issued; a result is only applied if its ticket belongs to the current
/// epoch and the view is still mounted.
#[derive(Debug, Default)]
pub struct Mount {
    epoch: u64,
    next_seq: u64,
    mounted: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticket {
    epoch: u64,
    seq: u64,
}

impl Mount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&mut self) -> Ticket {
        self.epoch = self.epoch.wrapping_add(1);
        self.mounted = true;
        self.issue()
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Ticket for a request issued within the current mount.
    pub fn issue(&mut self) -> Ticket {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        Ticket {
            epoch: self.epoch,
            seq,
        }
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.epoch == self.epoch
    }
}

impl Ticket {
    /// Issued after `other` within the same mount.
    pub fn supersedes(self, other: Ticket) -> bool {
        self.epoch == other.epoch && self.seq > other.seq
    }
}
