mod addrole;

use addrole_framework::prelude::*;

use self::addrole::addrole;

pub fn addrole_config(cmds: &mut Vec<Command>) {
    let addrole_cmd = Command::builder().names(&["addrole"]).handler(addrole);

    cmds.push(addrole_cmd);
}
