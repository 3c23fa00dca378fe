//! Interactive shell attach inside a container
//!
//! Deliberately on its own code path: this is the one workflow that
//! blocks for an unbounded, human-interactive duration, so it never
//! shares the captured-output execution used by scripted workflows.

use crate::channel::SshChannel;
use crate::errors::ConsoleError;

pub async fn run(channel: &SshChannel, container: &str) -> Result<i32, ConsoleError> {
    println!("Attaching to container {} (exit to leave)...\n", container);

    channel
        .interactive(&format!("docker exec -it {} bash", container))
        .await
}
