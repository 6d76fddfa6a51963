use dgramlink_channel::{establish_leader, ChannelConfig, ChannelNames};
use dgramlink_frame::Control;
use tracing::info;

use crate::cmd::RoleArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_summary, ExchangeSummary, OutputFormat};

pub fn run(args: RoleArgs, format: OutputFormat) -> CliResult<i32> {
    let names = ChannelNames {
        local: args.name,
        peer: args.peer,
    };

    let mut channel = establish_leader(&names, ChannelConfig::default())
        .map_err(|err| channel_error("establish failed", err))?;

    let mut summary = ExchangeSummary::for_role("lead");

    loop {
        let header = channel
            .receive_message()
            .map_err(|err| channel_error("receive failed", err))?;
        summary.record(&header);

        if header.control == Control::Stop {
            info!("stop received");
            break;
        }
    }

    channel
        .shutdown()
        .map_err(|err| channel_error("shutdown failed", err))?;

    print_summary(&summary, format);
    Ok(SUCCESS)
}
