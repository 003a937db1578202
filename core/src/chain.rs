use crate::{
    ctx::RainbowTableCtx,
    hash::Digest,
    password::Password,
    reduce::reduce_into,
};

/// A chain of the rainbow table, made of a startpoint and the digest ending the chain.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RainbowChain {
    pub startpoint: Password,
    pub endpoint: Digest,
}

impl RainbowChain {
    /// Creates a chain that has not been computed yet.
    pub fn with_startpoint(startpoint: Password) -> RainbowChain {
        RainbowChain {
            startpoint,
            endpoint: Digest::new(),
        }
    }

    /// Computes the endpoint of this chain from its startpoint.
    #[inline]
    pub fn compute(&mut self, ctx: &RainbowTableCtx) {
        self.endpoint = build_endpoint(&self.startpoint, ctx);
    }
}

/// Builds a full chain from a startpoint.
pub fn build_chain(startpoint: Password, ctx: &RainbowTableCtx) -> RainbowChain {
    let endpoint = build_endpoint(&startpoint, ctx);

    RainbowChain {
        startpoint,
        endpoint,
    }
}

/// Hashes and reduces `t` times, then hashes one last time.
/// The chain always ends on a digest, never on a reduction.
#[inline]
fn build_endpoint(startpoint: &Password, ctx: &RainbowTableCtx) -> Digest {
    let mut plaintext = startpoint.clone();

    for _ in 0..ctx.t {
        let digest = ctx.hash_function.hash(&plaintext);
        reduce_into(&mut plaintext, &digest, &ctx.charset, ctx.password_length);
    }

    ctx.hash_function.hash(&plaintext)
}

#[cfg(test)]
mod tests {
    use crate::{
        chain::{build_chain, RainbowChain},
        ctx::RainbowTableCtxBuilder,
        hash::HashFunction,
        password::Password,
        reduce::reduce,
    };

    #[test]
    fn test_chain_rounds() {
        let ctx = RainbowTableCtxBuilder::new()
            .hash(HashFunction::Sha1)
            .charset(b"abc")
            .password_length(3)
            .chain_length(2)
            .build()
            .unwrap();
        let start = Password::new(b"abc").unwrap();

        // hash -> reduce -> hash -> reduce -> hash
        let h0 = HashFunction::Sha1.hash(b"abc");
        let p1 = reduce(&h0, b"abc", 3).unwrap();
        let h1 = HashFunction::Sha1.hash(&p1);
        let p2 = reduce(&h1, b"abc", 3).unwrap();
        let h2 = HashFunction::Sha1.hash(&p2);

        let chain = build_chain(start.clone(), &ctx);
        assert_eq!(start, chain.startpoint);
        assert_eq!(h2, chain.endpoint);
    }

    #[test]
    fn test_single_round() {
        let ctx = RainbowTableCtxBuilder::new()
            .hash(HashFunction::Sha512)
            .charset(b"0123456789")
            .password_length(4)
            .chain_length(1)
            .build()
            .unwrap();
        let start = Password::new(b"1234").unwrap();

        let reduced = reduce(&HashFunction::Sha512.hash(b"1234"), b"0123456789", 4).unwrap();
        let expected = HashFunction::Sha512.hash(&reduced);

        let chain = build_chain(start.clone(), &ctx);
        assert_eq!(expected, chain.endpoint);
        assert_eq!(64, chain.endpoint.len());

        // a chain computed in place matches a chain built from scratch
        let mut in_place = RainbowChain::with_startpoint(start);
        assert!(in_place.endpoint.is_empty());
        in_place.compute(&ctx);
        assert_eq!(chain, in_place);
    }
}
