//! End-to-end scenarios across `gokube-common` and `gokube-core`, with a
//! scripted `VBoxManage` and a throwaway home directory.

#[cfg(test)]
mod support;

mod executor {
    mod integration;
}

mod network {
    mod integration;
}

mod machine {
    mod integration;
}
