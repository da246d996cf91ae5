use assert_cmd::Command;

pub fn crucible_command() -> Command {
    Command::cargo_bin("crucible").unwrap()
}
