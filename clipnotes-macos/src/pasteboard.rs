use anyhow::Result;
use clipnotes_core::ClipboardPort;
use cocoa::appkit::NSPasteboardTypeString;
use cocoa::base::{id, nil, BOOL, NO};
use cocoa::foundation::{NSAutoreleasePool, NSInteger, NSString};
use objc::{class, msg_send, sel, sel_impl};
use std::ffi::CStr;
use std::os::raw::c_char;

/// General pasteboard accessed through AppKit
///
/// Unlike the portable backend this reads `changeCount` directly, so every copy
/// is seen, including repeats of the same text and non-text content.
#[derive(Debug, Default)]
pub struct PasteboardClipboard;

impl PasteboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

unsafe fn general_pasteboard() -> id {
    msg_send![class!(NSPasteboard), generalPasteboard]
}

/// Run `f` inside an autorelease pool so temporaries are freed off the main thread too
unsafe fn with_pool<T>(f: impl FnOnce() -> T) -> T {
    let pool = NSAutoreleasePool::new(nil);
    let result = f();
    pool.drain();
    result
}

impl ClipboardPort for PasteboardClipboard {
    fn read(&self) -> Option<String> {
        unsafe {
            with_pool(|| {
                let pasteboard = general_pasteboard();
                let string: id = msg_send![pasteboard, stringForType: NSPasteboardTypeString];
                if string == nil {
                    return None;
                }
                let bytes: *const c_char = msg_send![string, UTF8String];
                if bytes.is_null() {
                    return None;
                }
                let text = CStr::from_ptr(bytes).to_string_lossy().into_owned();
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            })
        }
    }

    fn write(&self, text: &str) -> Result<()> {
        let ok = unsafe {
            with_pool(|| {
                let pasteboard = general_pasteboard();
                let _: NSInteger = msg_send![pasteboard, clearContents];
                let string = NSString::alloc(nil).init_str(text);
                let ok: BOOL = msg_send![pasteboard, setString: string forType: NSPasteboardTypeString];
                let () = msg_send![string, release];
                ok
            })
        };

        if ok == NO {
            anyhow::bail!("NSPasteboard rejected the string");
        }
        log::debug!("Wrote {} chars to pasteboard", text.len());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        unsafe {
            with_pool(|| {
                let _: NSInteger = msg_send![general_pasteboard(), clearContents];
            })
        }
        Ok(())
    }

    fn change_token(&self) -> u64 {
        let count: NSInteger = unsafe { msg_send![general_pasteboard(), changeCount] };
        count as u64
    }
}
