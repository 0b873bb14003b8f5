use crate::ffi;
use scip_sys::SCIP_Status;

/// Which SCIP limit stopped a solve.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Limit {
    /// Node, total node or stalling node limit.
    Nodes,
    /// Time limit, see `solver.time_limit`.
    Time,
    /// Memory limit.
    Memory,
    /// Gap limit.
    Gap,
    /// Solution or solution improvement limit.
    Solutions,
    /// Restart limit.
    Restarts,
}

/// Status of a finished SCIP solve, as far as the search cares.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// SCIP did not report a status this crate knows.
    Unknown,
    /// Solved to optimality; a best solution is stored.
    Optimal,
    /// Proven infeasible.
    Infeasible,
    /// Proven unbounded.
    Unbounded,
    /// Proven infeasible or unbounded, without telling which.
    InfeasibleOrUnbounded,
    /// Stopped by a limit before a proof was found.
    Limit(Limit),
    /// Stopped by the user or a signal.
    Interrupted,
}

impl From<SCIP_Status> for Status {
    fn from(val: SCIP_Status) -> Self {
        match val {
            ffi::SCIP_Status_SCIP_STATUS_OPTIMAL => Status::Optimal,
            ffi::SCIP_Status_SCIP_STATUS_INFEASIBLE => Status::Infeasible,
            ffi::SCIP_Status_SCIP_STATUS_UNBOUNDED => Status::Unbounded,
            ffi::SCIP_Status_SCIP_STATUS_INFORUNBD => Status::InfeasibleOrUnbounded,
            ffi::SCIP_Status_SCIP_STATUS_NODELIMIT
            | ffi::SCIP_Status_SCIP_STATUS_TOTALNODELIMIT
            | ffi::SCIP_Status_SCIP_STATUS_STALLNODELIMIT => Status::Limit(Limit::Nodes),
            ffi::SCIP_Status_SCIP_STATUS_TIMELIMIT => Status::Limit(Limit::Time),
            ffi::SCIP_Status_SCIP_STATUS_MEMLIMIT => Status::Limit(Limit::Memory),
            ffi::SCIP_Status_SCIP_STATUS_GAPLIMIT => Status::Limit(Limit::Gap),
            ffi::SCIP_Status_SCIP_STATUS_SOLLIMIT | ffi::SCIP_Status_SCIP_STATUS_BESTSOLLIMIT => {
                Status::Limit(Limit::Solutions)
            }
            ffi::SCIP_Status_SCIP_STATUS_RESTARTLIMIT => Status::Limit(Limit::Restarts),
            ffi::SCIP_Status_SCIP_STATUS_USERINTERRUPT | ffi::SCIP_Status_SCIP_STATUS_TERMINATE => {
                Status::Interrupted
            }
            _ => Status::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proofs() {
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_INFEASIBLE),
            Status::Infeasible
        );
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_INFORUNBD),
            Status::InfeasibleOrUnbounded
        );
    }

    #[test]
    fn limits() {
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_TIMELIMIT),
            Status::Limit(Limit::Time)
        );
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_STALLNODELIMIT),
            Status::Limit(Limit::Nodes)
        );
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_TERMINATE),
            Status::Interrupted
        );
    }

    #[test]
    fn unknown() {
        assert_eq!(
            Status::from(ffi::SCIP_Status_SCIP_STATUS_UNKNOWN),
            Status::Unknown
        );
    }
}
