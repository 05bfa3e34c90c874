use std::{rc::Rc, sync::RwLock};

/// A cloneable output sink which collects everything written to it into a
/// shared string. Hand one clone to the interpreter and keep the other to
/// inspect what `print` produced.
#[derive(Debug, Clone, Default)]
pub struct CaptureOutput {
    into: Rc<RwLock<String>>,
}

impl std::io::Write for CaptureOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let s = std::str::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        *self.into.write().unwrap() += s;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Display for CaptureOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.into.read().unwrap())
    }
}
