use crate::SurfaceError;

/// Native builds have no canvas; attaching always fails.
#[derive(Debug)]
pub struct StarfieldSurface {
    _private: (),
}

impl StarfieldSurface {
    pub fn attach(_seed: u64) -> Result<Self, SurfaceError> {
        Err(SurfaceError::Unavailable)
    }

    pub fn is_running(&self) -> bool {
        false
    }

    pub fn teardown(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_attach_is_unavailable() {
        assert_eq!(
            StarfieldSurface::attach(1).err(),
            Some(SurfaceError::Unavailable)
        );
    }
}
