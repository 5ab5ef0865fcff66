use time::OffsetDateTime;

/// Current wall-clock time in the local offset.
///
/// The local offset cannot always be determined (e.g. in multi-threaded
/// processes on some Unix platforms); UTC is used then.
pub(crate) fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|err| {
        tracing::debug!(%err, "local offset unavailable, using UTC");
        OffsetDateTime::now_utc()
    })
}
