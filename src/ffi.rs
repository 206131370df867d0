//! C ABI entry points for host applications
//!
//! The host passes file paths as NUL-terminated UTF-8 strings and may pass a
//! progress callback together with an opaque pointer handed back on every
//! call. Nothing is retained between calls.

use std::ffi::CStr;
use std::path::Path;

use libc::{c_char, c_int, c_void};

use crate::logging::{self, LogLevel};
use crate::sound::{decode_to_pcm, samples_per_block, ProgressSink};

/// Progress callback: `(percent, user_data)`
pub type ProgressCallback = extern "C" fn(c_int, *mut c_void);

/// Forwards progress to a host callback for the duration of one call
struct CallbackSink {
    callback: ProgressCallback,
    user_data: *mut c_void,
}

impl ProgressSink for CallbackSink {
    fn on_progress(&mut self, percent: u8) {
        (self.callback)(percent as c_int, self.user_data);
    }
}

/// Borrow a host path string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn host_path<'a>(ptr: *const c_char, what: &str) -> Option<&'a Path> {
    if ptr.is_null() {
        log::error!("adpcm_decode_to_pcm: {} path is null", what);
        return None;
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Some(Path::new(s)),
        Err(_) => {
            log::error!("adpcm_decode_to_pcm: {} path is not valid UTF-8", what);
            None
        }
    }
}

/// Decode an IMA-ADPCM WAVE file at `input` into a PCM WAVE file at `output`.
///
/// Returns true on success. On failure the output file may exist with
/// partial content.
///
/// # Safety
/// `input` and `output` must be null or valid NUL-terminated strings.
/// `callback`, when given, is invoked synchronously on the calling thread
/// with `user_data` and must not unwind.
#[no_mangle]
pub unsafe extern "C" fn adpcm_decode_to_pcm(
    input: *const c_char,
    output: *const c_char,
    callback: Option<ProgressCallback>,
    user_data: *mut c_void,
) -> bool {
    let (input, output) = match (host_path(input, "input"), host_path(output, "output")) {
        (Some(i), Some(o)) => (i, o),
        _ => return false,
    };

    let mut sink = callback.map(|callback| CallbackSink {
        callback,
        user_data,
    });
    let progress = sink.as_mut().map(|s| s as &mut dyn ProgressSink);
    decode_to_pcm(input, output, progress)
}

/// Sample-frames per block for the given geometry, or -1 when invalid
#[no_mangle]
pub extern "C" fn adpcm_samples_per_block(block_align: c_int, channels: c_int) -> c_int {
    let (Ok(block_align), Ok(channels)) = (u16::try_from(block_align), u16::try_from(channels))
    else {
        return -1;
    };
    samples_per_block(block_align, channels)
        .and_then(|n| c_int::try_from(n).ok())
        .unwrap_or(-1)
}

/// Install the logger at `level` (0-6), optionally appending to `log_file`.
///
/// Returns 0 on success, -1 on failure (including a second call).
///
/// # Safety
/// `log_file` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn adpcm_log_init(level: c_int, log_file: *const c_char) -> c_int {
    let path = if log_file.is_null() {
        None
    } else {
        match CStr::from_ptr(log_file).to_str() {
            Ok(s) => Some(Path::new(s)),
            Err(_) => return -1,
        }
    };
    match logging::init(LogLevel::from_i32(level), path) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("adpcm_log_init: {:#}", e);
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;
    use std::ptr;

    extern "C" fn record_progress(percent: c_int, user_data: *mut c_void) {
        let seen = unsafe { &mut *(user_data as *mut Vec<c_int>) };
        seen.push(percent);
    }

    fn ima_wav(blocks: usize) -> Vec<u8> {
        let data_size = (blocks * 256) as u32;
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(4 + 8 + 20 + 8 + data_size).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&20u32.to_le_bytes());
        #[rustfmt::skip]
        let fmt: [u8; 20] = [
            0x11, 0x00, 0x01, 0x00,  // IMA ADPCM, mono
            0x40, 0x1f, 0x00, 0x00,  // 8000 Hz
            0xd7, 0x0f, 0x00, 0x00,  // 4055 B/s
            0x00, 0x01, 0x04, 0x00,  // align 256, 4 bits
            0x02, 0x00, 0xf9, 0x01,  // cbSize 2, 505 samples/block
        ];
        out.extend_from_slice(&fmt);
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_size.to_le_bytes());
        out.resize(out.len() + data_size as usize, 0);
        out
    }

    #[test]
    fn test_samples_per_block() {
        assert_eq!(adpcm_samples_per_block(256, 1), 505);
        assert_eq!(adpcm_samples_per_block(2048, 2), 2041);
        assert_eq!(adpcm_samples_per_block(4, 1), -1);
        assert_eq!(adpcm_samples_per_block(256, 0), -1);
        assert_eq!(adpcm_samples_per_block(-1, 1), -1);
        assert_eq!(adpcm_samples_per_block(70_000, 1), -1);
    }

    #[test]
    fn test_decode_with_callback() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        std::fs::write(&input, ima_wav(2)).unwrap();

        let c_in = CString::new(input.to_str().unwrap()).unwrap();
        let c_out = CString::new(output.to_str().unwrap()).unwrap();
        let mut seen: Vec<c_int> = Vec::new();
        let ok = unsafe {
            adpcm_decode_to_pcm(
                c_in.as_ptr(),
                c_out.as_ptr(),
                Some(record_progress),
                &mut seen as *mut Vec<c_int> as *mut c_void,
            )
        };
        assert!(ok);
        assert_eq!(seen, vec![50, 100]);
        assert_eq!(std::fs::metadata(&output).unwrap().len(), 44 + 2 * 505 * 2);
    }

    #[test]
    fn test_decode_without_callback() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.wav");
        let output = dir.path().join("out.wav");
        std::fs::write(&input, ima_wav(1)).unwrap();

        let c_in = CString::new(input.to_str().unwrap()).unwrap();
        let c_out = CString::new(output.to_str().unwrap()).unwrap();
        assert!(unsafe { adpcm_decode_to_pcm(c_in.as_ptr(), c_out.as_ptr(), None, ptr::null_mut()) });
    }

    #[test]
    fn test_null_paths_rejected() {
        let c_out = CString::new("unused.wav").unwrap();
        assert!(!unsafe { adpcm_decode_to_pcm(ptr::null(), c_out.as_ptr(), None, ptr::null_mut()) });
        assert!(!unsafe { adpcm_decode_to_pcm(c_out.as_ptr(), ptr::null(), None, ptr::null_mut()) });
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let bad = CString::new(vec![0xff, 0xfe]).unwrap();
        let c_out = CString::new("unused.wav").unwrap();
        assert!(!unsafe { adpcm_decode_to_pcm(bad.as_ptr(), c_out.as_ptr(), None, ptr::null_mut()) });
    }
}
