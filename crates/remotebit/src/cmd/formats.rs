use crate::cmd::FormatsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_formats, OutputFormat};

pub fn run(_args: FormatsArgs, format: OutputFormat) -> CliResult<i32> {
    print_formats(format);
    Ok(SUCCESS)
}
