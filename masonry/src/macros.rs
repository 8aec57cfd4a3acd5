/// Emits a `tracing` event under the `masonry` target. Without the `tracing` feature the
/// statement is compiled out, arguments included.
macro_rules! masonry_event {
    ($level:ident, $($tt:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::$level!(target: "masonry", $($tt)*);
    };
}

macro_rules! mtrace {
    ($($tt:tt)*) => {
        masonry_event!(trace, $($tt)*)
    };
}

macro_rules! mdebug {
    ($($tt:tt)*) => {
        masonry_event!(debug, $($tt)*)
    };
}

macro_rules! mwarn {
    ($($tt:tt)*) => {
        masonry_event!(warn, $($tt)*)
    };
}
