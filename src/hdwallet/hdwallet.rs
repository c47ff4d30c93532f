use std::str::FromStr;

use crate::{
    hdwallet::{
        ChildOptions,
        ExtendedKey,
        ExtendedKeySerializer,
        HDWError,
        KeyScheme,
        Path,
        WalletType,
        XKey,
        Xprv,
        Xpub
    },
    key::PrivKey,
    util::Network
};

/**
    A single account HD wallet: m/purpose'/coin_type'/account'
    with receiving (0) and change (1) chains below it.
*/
#[derive(Debug, Clone)]
pub struct HDWallet {
    mpriv_key: Xprv,
    account_key: Xprv,
    pub account: u32
}

impl HDWallet {
    /**
        Creates a new HD wallet from a seed. The purpose and coin type of the
        account path follow the scheme's wallet type and network.
    */
    pub fn from_seed(seed: &[u8], scheme: KeyScheme, account: u32) -> Result<Self, HDWError> {
        let mpriv_key = Xprv::from_seed(seed, scheme)?;
        let path = Path::bip44_account(scheme.wallet_type.purpose(), scheme.network.coin_type(), account);
        let account_key = mpriv_key.derive_from_path(&path)?;

        log::debug!("opened {:?} wallet at {}", scheme.wallet_type, path);
        Ok(Self {
            mpriv_key,
            account_key,
            account
        })
    }

    pub fn wallet_type(&self) -> WalletType {
        self.mpriv_key.scheme().wallet_type
    }

    pub fn network(&self) -> Network {
        self.mpriv_key.scheme().network
    }

    pub fn account_path(&self) -> Path {
        Path::bip44_account(self.wallet_type().purpose(), self.network().coin_type(), self.account)
    }

    pub fn master_private_key(&self) -> &Xprv {
        &self.mpriv_key
    }

    pub fn master_public_key(&self) -> Xpub {
        self.mpriv_key.get_xpub()
    }

    pub fn account_private_key(&self) -> &Xprv {
        &self.account_key
    }

    pub fn account_public_key(&self) -> Xpub {
        self.account_key.get_xpub()
    }

    /**
        Derives the extended private key at an absolute path from the master key.
    */
    pub fn xprv_at(&self, path: &str) -> Result<Xprv, HDWError> {
        self.mpriv_key.derive_from_path(&Path::from_str(path)?)
    }

    fn chain_key(&self, change: bool) -> Result<Xprv, HDWError> {
        self.account_key.get_xchild(ChildOptions::Normal(change as u32))
    }

    /**
        Address at account/change/index
    */
    pub fn address_at(&self, change: bool, index: u32) -> Result<String, HDWError> {
        self.chain_key(change)?
            .get_xchild(ChildOptions::Normal(index))?
            .get_address()
    }

    /**
        Private key of the address at account/change/index
    */
    pub fn address_private_key(&self, change: bool, index: u32) -> Result<PrivKey, HDWError> {
        Ok(self.chain_key(change)?
            .get_xchild(ChildOptions::Normal(index))?
            .get_prv())
    }

    /**
        count consecutive addresses starting at index start.
    */
    pub fn addresses(&self, change: bool, start: u32, count: u32) -> Result<Vec<String>, HDWError> {
        let chain = self.chain_key(change)?;
        (0..count).map(|i| {
            let index = start.checked_add(i).ok_or(HDWError::IndexTooLarge(u32::MAX))?;
            chain.get_xchild(ChildOptions::Normal(index))?.get_address()
        }).collect()
    }

    pub fn watch_only(&self) -> WatchOnly {
        WatchOnly::new(self.account_public_key())
    }
}

/**
    Address generation from an account xpub alone, no private keys.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOnly {
    account_key: Xpub
}

impl WatchOnly {
    pub fn new(account_key: Xpub) -> Self {
        Self { account_key }
    }

    /**
        Imports an account xpub. The serializer decides which version bytes are accepted.
    */
    pub fn from_xpub_str(xpub: &str, serializer: &ExtendedKeySerializer) -> Result<Self, HDWError> {
        match serializer.deserialize(xpub)? {
            XKey::Public(x) => Ok(Self::new(x)),
            XKey::Private(_) => Err(HDWError::MalformedExtendedKey(
                "watch only wallets take an extended public key".to_string()
            ))
        }
    }

    pub fn account_public_key(&self) -> &Xpub {
        &self.account_key
    }

    pub fn address_at(&self, change: bool, index: u32) -> Result<String, HDWError> {
        self.account_key
            .get_xchild(ChildOptions::Normal(change as u32))?
            .get_xchild(ChildOptions::Normal(index))?
            .get_address()
    }

    pub fn addresses(&self, change: bool, start: u32, count: u32) -> Result<Vec<String>, HDWError> {
        let chain = self.account_key.get_xchild(ChildOptions::Normal(change as u32))?;
        (0..count).map(|i| {
            let index = start.checked_add(i).ok_or(HDWError::IndexTooLarge(u32::MAX))?;
            chain.get_xchild(ChildOptions::Normal(index))?.get_address()
        }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hdwallet::HARDENED_OFFSET,
        util::Network
    };

    //BIP-39 seed of "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about", no passphrase
    const ABANDON_SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    fn wallet(scheme: KeyScheme) -> HDWallet {
        HDWallet::from_seed(&hex::decode(ABANDON_SEED).unwrap(), scheme, 0).unwrap()
    }

    #[test]
    fn bip84_test_vectors() -> Result<(), HDWError> {
        let hdw = wallet(KeyScheme::bip84(Network::Bitcoin));

        assert_eq!(hdw.master_private_key().serialize(), "zprvAWgYBBk7JR8Gjrh4UJQ2uJdG1r3WNRRfURiABBE3RvMXYSrRJL62XuezvGdPvG6GFBZduosCc1YP5wixPox7zhZLfiUm8aunE96BBa4Kei5");
        assert_eq!(hdw.master_public_key().serialize(), "zpub6jftahH18ngZxLmXaKw3GSZzZsszmt9WqedkyZdezFtWRFBZqsQH5hyUmb4pCEeZGmVfQuP5bedXTB8is6fTv19U1GQRyQUKQGUTzyHACMF");

        // Account 0, root = m/84'/0'/0'
        assert_eq!(hdw.account_path().to_string(), "m/84'/0'/0'");
        assert_eq!(hdw.account_private_key().serialize(), "zprvAdG4iTXWBoARxkkzNpNh8r6Qag3irQB8PzEMkAFeTRXxHpbF9z4QgEvBRmfvqWvGp42t42nvgGpNgYSJA9iefm1yYNZKEm7z6qUWCroSQnE");
        assert_eq!(hdw.account_public_key().serialize(), "zpub6rFR7y4Q2AijBEqTUquhVz398htDFrtymD9xYYfG1m4wAcvPhXNfE3EfH1r1ADqtfSdVCToUG868RvUUkgDKf31mGDtKsAYz2oz2AGutZYs");

        // Account 0, first receiving address = m/84'/0'/0'/0/0
        assert_eq!(hdw.address_private_key(false, 0)?.export_as_wif(true, Network::Bitcoin), "KyZpNDKnfs94vbrwhJneDi77V6jF64PWPF8x5cdJb8ifgg2DUc9d");
        assert_eq!(hdw.address_at(false, 0)?, "bc1qcr8te4kr609gcawutmrza0j4xv80jy8z306fyu");

        // Account 0, second receiving address = m/84'/0'/0'/0/1
        assert_eq!(hdw.address_private_key(false, 1)?.export_as_wif(true, Network::Bitcoin), "Kxpf5b8p3qX56DKEe5NqWbNUP9MnqoRFzZwHRtsFqhzuvUJsYZCy");
        assert_eq!(hdw.address_at(false, 1)?, "bc1qnjg0jd8228aq7egyzacy8cys3knf9xvrerkf9g");

        // Account 0, first change address = m/84'/0'/0'/1/0
        assert_eq!(hdw.address_private_key(true, 0)?.export_as_wif(true, Network::Bitcoin), "KxuoxufJL5csa1Wieb2kp29VNdn92Us8CoaUG3aGtPtcF3AzeXvF");
        assert_eq!(hdw.address_at(true, 0)?, "bc1q8c6fshw2dlwun7ekn9qwf37cu2rn755upcp6el");

        Ok(())
    }

    #[test]
    fn bip49_test_vector() -> Result<(), HDWError> {
        //BIP-49 uses testnet, m/49'/1'/0'/0/0
        let hdw = wallet(KeyScheme::bip49(Network::Testnet));

        assert_eq!(hdw.account_path().to_string(), "m/49'/1'/0'");
        assert!(hdw.account_private_key().serialize().starts_with("uprv"));
        assert_eq!(
            hex::encode(hdw.xprv_at("m/49'/1'/0'/0/0")?.get_pub().as_bytes()),
            "03a1af804ac108a8a51782198c2d034b28bf90c8803f5a53f76276fa69a4eae77f"
        );
        assert_eq!(hdw.address_at(false, 0)?, "2Mww8dCYPUpKHofjgcXcBCEGmniw9CoaiD2");

        Ok(())
    }

    #[test]
    fn bip44_addresses() -> Result<(), HDWError> {
        let hdw = wallet(KeyScheme::bip44(Network::Bitcoin));
        let addresses = hdw.addresses(false, 0, 5)?;

        assert_eq!(addresses.len(), 5);
        assert!(addresses.iter().all(|a| a.starts_with('1')));
        assert_eq!(addresses[3], hdw.address_at(false, 3)?);
        assert_eq!(hdw.xprv_at("m/44'/0'/0'")?, *hdw.account_private_key());

        Ok(())
    }

    #[test]
    fn watch_only_matches_wallet() -> Result<(), HDWError> {
        for scheme in [KeyScheme::bip44(Network::Bitcoin), KeyScheme::bip49(Network::Bitcoin), KeyScheme::bip84(Network::Testnet)] {
            let hdw = wallet(scheme);
            let xpub = hdw.account_public_key().serialize();
            let watch = WatchOnly::from_xpub_str(&xpub, &ExtendedKeySerializer::standard())?;

            assert_eq!(watch, hdw.watch_only());
            assert_eq!(watch.addresses(false, 0, 3)?, hdw.addresses(false, 0, 3)?);
            assert_eq!(watch.address_at(true, 9)?, hdw.address_at(true, 9)?);
        }

        Ok(())
    }

    #[test]
    fn watch_only_rejects_private_keys() {
        let hdw = wallet(KeyScheme::bip44(Network::Bitcoin));
        let xprv = hdw.account_private_key().serialize();
        assert!(WatchOnly::from_xpub_str(&xprv, &ExtendedKeySerializer::standard()).is_err());
    }

    #[test]
    fn address_index_bounds() {
        let hdw = wallet(KeyScheme::bip44(Network::Bitcoin));
        assert_eq!(hdw.address_at(false, HARDENED_OFFSET), Err(HDWError::IndexTooLarge(HARDENED_OFFSET)));
        assert!(hdw.xprv_at("m/44'/0'/x").is_err());
    }

    #[test]
    fn parallel_accounts() {
        //Independent paths from one master key can be derived on separate threads
        let hdw = wallet(KeyScheme::bip44(Network::Bitcoin));
        let master = hdw.master_private_key();

        let derived: Vec<Xprv> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4u32).map(|account| {
                s.spawn(move || master.derive_from_path(&Path::bip44_account(44, 0, account)).unwrap())
            }).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(derived[0], *hdw.account_private_key());
        for (account, key) in derived.iter().enumerate() {
            assert_eq!(key.index(), HARDENED_OFFSET + account as u32);
        }
    }
}
