//! Native functions installed in every interpreter.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Interpreter, Value};

pub(crate) fn install(interpreter: &mut Interpreter) {
    interpreter.define_native("clock", 0, clock);
}

/// Seconds since the Unix epoch, with sub-second precision.
fn clock(_: &[Value]) -> Result<Value, String> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| e.to_string())?;
    Ok(Value::Number(elapsed.as_secs_f64()))
}
