use dgramlink_channel::{establish_follower, ChannelConfig, ChannelNames};
use dgramlink_frame::{Control, HEADER_SIZE};
use tracing::info;

use crate::cmd::FollowArgs;
use crate::exit::{channel_error, CliResult, SUCCESS};
use crate::output::{print_summary, ExchangeSummary, OutputFormat};

pub fn run(args: FollowArgs, format: OutputFormat) -> CliResult<i32> {
    let names = ChannelNames {
        local: args.role.name,
        peer: args.role.peer,
    };

    let mut channel = establish_follower(&names, ChannelConfig::default())
        .map_err(|err| channel_error("establish failed", err))?;

    let mut summary = ExchangeSummary::for_role("follow");

    for &size in &args.payload_sizes {
        for _ in 0..args.count {
            let header = channel
                .send_message(size, Control::Run)
                .map_err(|err| channel_error("send failed", err))?;
            summary.record(&header);
        }
    }

    let stop = channel
        .send_message(HEADER_SIZE as u32, Control::Stop)
        .map_err(|err| channel_error("send failed", err))?;
    summary.record(&stop);
    info!("stop sent");

    channel
        .shutdown()
        .map_err(|err| channel_error("shutdown failed", err))?;

    print_summary(&summary, format);
    Ok(SUCCESS)
}
