use soroban_sdk::Env;

use crate::error::Error;
use crate::storage::DataKey;

pub fn lock(env: &Env) -> Result<(), Error> {
    let locked = env
        .storage()
        .instance()
        .get::<DataKey, bool>(&DataKey::Locked)
        .unwrap_or(false);
    if locked {
        return Err(Error::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Locked, &true);
    Ok(())
}

pub fn unlock(env: &Env) {
    env.storage().instance().remove(&DataKey::Locked);
}

/// Run `op` holding the vault lock. The lock is released whatever `op` returns.
pub fn guarded<T>(env: &Env, op: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    lock(env)?;
    let result = op();
    unlock(env);
    result
}
