use crate::error::CliError;
use connectors::sql::base::accessor::{ParameterAccessor, ParameterAccessors};

pub fn print_accessors(
    title: &str,
    accessors: &ParameterAccessors,
    as_json: bool,
) -> Result<(), CliError> {
    if as_json {
        let list: Vec<&ParameterAccessor> = accessors.iter().collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("{title}");
    println!(
        "{:<4} {:<24} {:<7} {:<28} {:<12} {}",
        "Pos", "Name", "Dir", "Data type", "Host type", "Size"
    );
    for accessor in accessors {
        println!(
            "{:<4} {:<24} {:<7} {:<28} {:<12} {}",
            accessor.position(),
            accessor.name().unwrap_or("(return)"),
            accessor.direction().as_str(),
            accessor.data_type(),
            accessor.host_type().name(),
            accessor
                .size()
                .map_or_else(|| "-".to_string(), |size| size.to_string())
        );
    }
    Ok(())
}
