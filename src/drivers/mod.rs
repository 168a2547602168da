pub mod bridge;
pub mod console;
pub mod keyboard;
pub mod output_driver;

pub use bridge::EventBridge;
pub use output_driver::OutputDriver;

use ::crossterm::event::Event;
use std::io;
use std::time::Duration;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;
    use std::time::Duration;

    struct Scripted {
        events: VecDeque<Event>,
        capture: Option<bool>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("no scripted events left"))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture = Some(enabled);
            Ok(())
        }
    }

    fn read_all<D: InputDriver>(mut driver: D) -> Vec<Event> {
        let mut out = Vec::new();
        while driver.poll(Duration::from_millis(0)).unwrap() {
            out.push(driver.read().unwrap());
        }
        driver.set_mouse_capture(true).unwrap();
        out
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Scripted {
            events: VecDeque::from([Event::Key(KeyEvent::new(
                KeyCode::Char('x'),
                KeyModifiers::NONE,
            ))]),
            capture: None,
        };
        let events = read_all(&mut d);
        assert_eq!(events.len(), 1);
        if let Event::Key(k) = &events[0] {
            assert_eq!(k.code, KeyCode::Char('x'));
        } else {
            panic!("expected key");
        }
        assert_eq!(d.capture, Some(true));
    }
}
